//! Double elimination brackets.
//!
//! Competitors play until they have lost twice. Winner's-bracket dropouts
//! fall into a loser's bracket, the two bracket champions meet in the finals,
//! and an optional reset match is played only when the loser's-bracket
//! champion wins that first finals match.
//!
//! ```
//! use double_elimination::Tournament;
//!
//! let mut tournament = Tournament::new(vec!["ann", "bo", "cy", "di"]).unwrap();
//! while tournament.winners().is_none() {
//!     let match_id = tournament.active_matches()[0].id();
//!     let [left, _] = tournament.participants(match_id).unwrap();
//!     tournament.resolve(match_id, &left.unwrap()).unwrap();
//! }
//! assert_eq!(tournament.winners(), Some(vec!["ann"]));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod match_node;
pub mod replay;
pub mod shared;
pub mod simulate;
pub mod slot;
pub mod tournament;

pub use builder::{build_bracket, Bracket};
pub use config::{BracketConfig, BracketSettings, EntrantConfig};
pub use error::{BracketError, ConfigError};
pub use logging::{init_logging, LogConfig};
pub use match_node::{BracketSide, MatchId, MatchNode, MatchState};
pub use replay::{Decision, DecisionLog};
pub use shared::SharedTournament;
pub use simulate::Simulation;
pub use slot::{SlotArena, SlotId};
pub use tournament::{Competitor, MatchSnapshot, Tournament, TournamentSnapshot};
