use crate::simulator::Scheduler;
use std::io;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid scheduler '{0}', expected one of FCFS, RR or SJF.")]
    ParseSchedulerError(String),
    #[error("Scheduler {0} is not implemented.")]
    UnsupportedScheduler(Scheduler),
    #[error("The round robin quantum must be greater than 0.")]
    InvalidQuantum,
    #[error("Invalid priority {0}, value must be 1 (LOW), 2 (MEDIUM) or 3 (HIGH).")]
    InvalidPriority(u32),
    #[error("Invalid process descriptor '{1}' on line {0}, expected 5 fields.")]
    InvalidDescriptor(usize, String),
    #[error("Invalid value '{1}' on line {0}, value must be a non negative integer.")]
    ParseIntError(usize, String),
    #[error("Duplicated process id {1} on line {0}.")]
    DuplicateId(usize, u32),
    #[error("File should contain valid utf8")]
    Utf8Error,
    #[error("IO Error: {0:?}")]
    IO(io::ErrorKind),
    #[error("Invalid config file: {0}")]
    Config(String),
    #[error("Could not serialize the report: {0}")]
    Report(String),
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::IO(error.kind())
    }
}
