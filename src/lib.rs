//! # Introduction
//!
//! stepviz turns data structure algorithms into ordered lists of visual
//! steps and plays them back under user control (play, pause, resume, stop,
//! reset, single-step, speed). Structural changes travel with the steps and
//! are applied to the canonical model only when their step finishes, so what
//! is on screen always matches how far playback has got.
//!
//! ## Pipeline
//!
//! ```text
//! Structure → Generator → Vec<Step> → PlaybackEngine → (mutations) → Structure
//!                                              ↓
//!                                       events / frames → TUI
//! ```
//!
//! 1. [`structures`]: canonical models (array, linked list, hash table,
//!    binary heap, Huffman tree) and the [`step::Mutation`] interpreter.
//! 2. [`generators`]: one generator per (structure, operation) pair.
//!    Generators read a structure and never mutate it.
//! 3. [`step`]: the [`step::Step`] record and the sequence builder.
//! 4. [`engine`]: the playback state machine, easing and events.
//! 5. [`config`]: TOML configuration with command-line overrides.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Supported operations
//!
//! Arrays: Bubble, Selection, Insertion and Quick Sort; Linear and Binary
//! Search. Linked lists: insert at head, tail or index; delete head; reverse;
//! search. Hash tables: insert, search, delete with chaining. Heaps: insert,
//! extract root, build heap. Huffman: build, encode, decode.

pub mod config;
pub mod engine;
pub mod generators;
pub mod step;
pub mod structures;
pub mod ui;
