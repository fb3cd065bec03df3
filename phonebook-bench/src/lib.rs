pub mod bench;
pub mod constants;
pub mod hash;
pub mod outcome;
pub mod record;
pub mod report;
pub mod sample;
pub mod search;
pub mod sort;
pub mod source;
