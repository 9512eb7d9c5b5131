use crate::{
    availability::WeekAvailability,
    backend::{AvailabilityBackend, StoreError},
    roster::Roster,
};

#[derive(Debug, thiserror::Error)]
#[error("could not load player {player}")]
pub struct AggregateError {
    pub player: String,
    #[source]
    pub source: StoreError,
}

/// Master grid: a slot is busy as soon as one of the weeks is busy there.
pub fn aggregate<'a, I>(weeks: I) -> WeekAvailability
where
    I: IntoIterator<Item = &'a WeekAvailability>,
{
    weeks
        .into_iter()
        .fold(WeekAvailability::new_free(), |mut master, week| {
            master |= week;
            master
        })
}

/// Aggregates the latest availability of every roster member.
///
/// Stops at the first player that cannot be loaded; there is no partial result.
pub fn aggregate_roster<T: AvailabilityBackend>(
    roster: &Roster,
    backend: &T,
) -> Result<WeekAvailability, AggregateError> {
    let weeks = roster
        .players()
        .iter()
        .map(|player| {
            backend
                .load(player)
                .map(|record| record.availability)
                .map_err(|source| AggregateError {
                    player: player.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(aggregate(&weeks))
}
