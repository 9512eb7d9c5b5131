use std::path::PathBuf;

pub trait Configuration: Clone + Send + Sync + 'static {
    fn port(&self) -> u16;
    /// Directory of the `.survive` files. `None` keeps everything in memory.
    fn data_dir(&self) -> Option<PathBuf>;
    /// Directory holding `conf` / `conf.processed`.
    fn config_dir(&self) -> PathBuf;
}
