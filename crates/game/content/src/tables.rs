//! Bundle of every read-only lookup table the runtime consumes.

use crate::abilities::AbilityTable;
use crate::narrative::NarrativePools;
use crate::roster::Roster;

#[derive(Clone, Debug, Default)]
pub struct ContentTables {
    pub roster: Roster,
    pub abilities: AbilityTable,
    pub narrative: NarrativePools,
}

impl ContentTables {
    pub fn builtin() -> Self {
        Self {
            roster: Roster::builtin(),
            abilities: AbilityTable::builtin(),
            narrative: NarrativePools::builtin(),
        }
    }
}
