use crate::error::Error;
use crate::simulator::{Priority, ProcessDescriptor};
use std::collections::HashSet;
use std::fmt::Write;

const COMMENT: &str = "//";
const HEADER: &str = "// PID | CPU burst | IO burst | Repetitions | Priority";

// Parse a workload file
pub fn read_file(stream: &[u8]) -> Result<Vec<ProcessDescriptor>, Error> {
    let string = match std::str::from_utf8(stream) {
        Ok(content) => content,
        Err(_) => return Err(Error::Utf8Error),
    };

    let mut descriptors: Vec<ProcessDescriptor> = vec![];
    let mut ids = HashSet::new();

    for (i, line) in string.lines().enumerate() {
        let row = i + 1;
        let line = line.trim();

        // Ignore empty lines and comments
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }

        let descriptor = parse_descriptor(row, line)?;
        if !ids.insert(descriptor.id) {
            return Err(Error::DuplicateId(row, descriptor.id));
        }
        descriptors.push(descriptor);
    }

    Ok(descriptors)
}

fn parse_descriptor(row: usize, line: &str) -> Result<ProcessDescriptor, Error> {
    let fields = line.split_whitespace().collect::<Vec<&str>>();
    if fields.len() != 5 {
        return Err(Error::InvalidDescriptor(row, line.to_string()));
    }

    let mut values = [0u32; 5];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = field
            .parse::<u32>()
            .map_err(|_| Error::ParseIntError(row, field.to_string()))?;
    }
    let [id, cpu_burst, io_burst, reps, priority] = values;

    Ok(ProcessDescriptor {
        id,
        cpu_burst,
        io_burst,
        reps,
        priority: Priority::try_from(priority)?,
    })
}

/// Render descriptors in the format `read_file` accepts.
pub fn to_text(descriptors: &[ProcessDescriptor]) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');

    for d in descriptors {
        // Writing to a String can't fail
        let _ = writeln!(
            text,
            "{} {} {} {} {}",
            d.id,
            d.cpu_burst,
            d.io_burst,
            d.reps,
            u32::from(d.priority)
        );
    }

    text
}
