//! scriptpack-core: the packaging pipeline behind scriptpack.
//!
//! A packaging *target* names an ordered list of script sources and the two
//! artifacts generated from them: a plain-text bundle (the sources joined
//! with single newlines) and a C header that embeds those same bytes as a
//! hex-escaped string literal, ready to be compiled into a host binary.
//!
//! The pipeline is a straight line: read the sources in order, join them,
//! write the bundle, hex-encode the bundle, regroup the digits into `\xHH`
//! escapes, wrap at 80 columns, and emit one `static const char` declaration.
//! [`pack::pack_target`] runs that line once; [`pack::pack_many`] drives a
//! whole table of targets, in parallel when asked.
//!
//! ```no_run
//! use scriptpack_core::pack::{pack_many, PackOptions};
//! use scriptpack_core::target::builtin_targets;
//!
//! let reports = pack_many(".".as_ref(), &builtin_targets(), &PackOptions::default())?;
//! for report in &reports {
//!     println!("{}: {} bytes", report.target, report.script_bytes);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! The header format is rigid on purpose: headers must stay byte-identical
//! with ones generated by the earlier packaging scripts, so the 80-column
//! wrap cuts at raw offsets and never looks at token boundaries. The inverse
//! transform lives in [`header`] and recovers the exact script bytes from a
//! generated header.

pub mod bundle;
pub mod encode;
pub mod header;
pub mod output;
pub mod pack;
pub mod target;
