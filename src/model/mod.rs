//! Document model types for board report representation.
//!
//! This module defines the intermediate representation (IR) that bridges
//! report parsing and rendering. Both the interactive renderer and the static
//! exporter consume this single model, so the two outputs cannot drift apart.

mod block;
mod document;
mod side;

pub use block::{Block, Inline, List, ListItem, Table, TableCell, TextStyle};
pub use document::{Document, Section, SectionKind};
pub use side::{BoardMember, BoardRoster, IcpProfile, Persona};

pub(crate) use block::plain_runs;
