use std::path::Path;

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::market::Market;
use super::option::{OptionKind, OptionView};
use super::strike::Strike;
use crate::error::{Error, Result};

/// Everything a quote reads, fetched together so one quote sees one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub market: Market,
    /// Block timestamp the state was read at.
    pub timestamp: u64,
    pub boards: Vec<Board>,
    pub strikes: Vec<Strike>,
}

impl MarketSnapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn board(&self, board_id: u64) -> Result<&Board> {
        self.boards
            .iter()
            .find(|b| b.id == board_id)
            .ok_or(Error::UnknownBoard { board_id })
    }

    pub fn strike(&self, strike_id: u64) -> Result<&Strike> {
        self.strikes
            .iter()
            .find(|s| s.id == strike_id)
            .ok_or(Error::UnknownStrike { strike_id })
    }

    /// Resolve an option view for `strike_id`.
    pub fn option(&self, strike_id: u64, kind: OptionKind) -> Result<OptionView<'_>> {
        let strike = self.strike(strike_id)?;
        let board = self.board(strike.board_id)?;
        Ok(OptionView::new(self, board, strike, kind))
    }

    /// Every listed option, calls before puts, in strike order.
    pub fn options(&self) -> Result<Vec<OptionView<'_>>> {
        let mut options = Vec::with_capacity(self.strikes.len() * 2);
        for kind in [OptionKind::Call, OptionKind::Put] {
            for strike in &self.strikes {
                options.push(self.option(strike.id, kind)?);
            }
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::example;

    #[test]
    fn test_option_lookup() {
        let snapshot = example::snapshot();
        let strike_id = snapshot.strikes[0].id;
        let option = snapshot.option(strike_id, OptionKind::Put).unwrap();
        assert_eq!(option.strike().id, strike_id);
        assert_eq!(option.board().id, snapshot.strikes[0].board_id);
        assert_eq!(option.delta(), snapshot.strikes[0].put.delta);
        assert!(!option.is_call());
    }

    #[test]
    fn test_unknown_ids() {
        let mut snapshot = example::snapshot();
        assert!(matches!(
            snapshot.option(999, OptionKind::Call),
            Err(Error::UnknownStrike { strike_id: 999 })
        ));
        snapshot.strikes[0].board_id = 77;
        let strike_id = snapshot.strikes[0].id;
        assert!(matches!(
            snapshot.option(strike_id, OptionKind::Call),
            Err(Error::UnknownBoard { board_id: 77 })
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let snapshot = example::snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(MarketSnapshot::from_json(&json).unwrap(), snapshot);
    }
}
