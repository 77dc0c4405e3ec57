//! Room adapters: one submodule per poker-room text format.
//!
//! Each adapter owns its delimiter pattern and line grammars and implements
//! [`RoomAdapter`](crate::history::RoomAdapter); the generic pipeline in
//! [`history`](crate::history) owns everything else.

pub mod fulltilt;

pub use fulltilt::FullTilt;
