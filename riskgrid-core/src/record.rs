//! Types and traits for recording step and episode information.
//!
//! # Core Components
//!
//! * [`Record`] - A container for key-value pairs of various data types
//! * [`RecordValue`] - An enum of the types of values that can be stored
//! * [`Recorder`] - A trait for writing records to some destination
//! * [`BufferedRecorder`] - A recorder that keeps records in memory
//! * [`NullRecorder`] - A recorder that discards all records
//!
//! # Basic Usage
//!
//! ```rust
//! use riskgrid_core::record::{Record, RecordValue};
//!
//! // following values are obtained with some process in reality
//! let step = 1;
//! let pos = vec![2f32, 9.0];
//! let reward = -1f32;
//!
//! let mut record = Record::empty();
//! record.insert("step", RecordValue::Scalar(step as f32));
//! record.insert("reward", RecordValue::Scalar(reward));
//! record.insert("agent_pos", RecordValue::Array1(pos));
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
