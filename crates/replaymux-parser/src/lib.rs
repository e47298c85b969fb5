//! # replaymux-parser
//!
//! Pure format readers for the two XML documents a recorded session ships:
//!
//! - `shapes.svg` — the slide-event log: which image was shown during which
//!   time interval ([`shapes`])
//! - `metadata.xml` — session metadata, of which only the playback duration
//!   is consumed ([`metadata`])
//!
//! Both readers extract flat record lists and nothing else; interpretation
//! of the records is the timeline builder's job.
//!
//! ## Quick Start
//!
//! ```
//! let doc = r#"<svg xmlns="http://www.w3.org/2000/svg"
//!               xmlns:xlink="http://www.w3.org/1999/xlink">
//!     <image id="image1" in="0.0" out="7.5" xlink:href="presentation/s/slide-1.png"/>
//! </svg>"#;
//!
//! let events = replaymux_parser::shapes::parse(doc)?;
//! assert_eq!(events[0].id, "image1");
//! assert_eq!(events[0].out_secs, 7.5);
//! # Ok::<(), replaymux_parser::ParseError>(())
//! ```

pub mod metadata;
pub mod shapes;

mod error;

pub use error::{ParseError, Result};
pub use shapes::SlideEvent;
