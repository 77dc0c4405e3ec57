//! hand-history-rs: poker hand-history parsing library
//!
//! Turns raw hand-history text, as emitted by poker-room clients, into a
//! structured record of one hand: players, seating, per-street actions,
//! board cards, pot and winners, plus board-texture analysis for replay and
//! statistics tooling.
//!
//! The core is room-agnostic: a section splitter over the raw text and a
//! fixed pipeline of parse stages that any room format plugs into through
//! the [`history::RoomAdapter`] trait. The [`room`] module ships the Full
//! Tilt Poker adapter.
//!
//! ## Quick start: parse a Full Tilt hand
//! ```no_run
//! use hand_history::history::HandHistory;
//! use hand_history::room::FullTilt;
//!
//! let mut hand = HandHistory::from_file("hand.txt")?;
//! hand.parse(&FullTilt::new())?;
//!
//! println!("#{}: {} won", hand.ident.as_deref().unwrap_or("?"), hand.winners.len());
//! if let Some(flop) = &hand.flop {
//!     println!("flop rainbow: {}", flop.texture().is_rainbow);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cards;
pub mod combo;
pub mod constants;
pub mod history;
pub mod room;
pub mod section;
pub mod street;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
