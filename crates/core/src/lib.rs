#![deny(warnings)]

//! Feedback synthesis for recorded speech: emotion summary, filler-word
//! fluency, a clarity score and prioritized coaching suggestions, built from
//! an externally produced transcript and emotion scores.

pub mod asr;
pub mod audio;
pub mod chart;
pub mod coaching;
pub mod confidence;
pub mod config;
pub mod emotion;
pub mod fluency;
pub mod pipeline;
pub mod report;
