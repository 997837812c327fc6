use std::{fs, io};
use std::io::{BufRead, BufReader};
use std::path::Path;

pub(crate) fn file_to_vec(filename: &Path) -> io::Result<Vec<String>> {
    let file_in = fs::File::open(filename)?;
    let file_reader = BufReader::new(file_in);
    Ok(file_reader
        .lines()
        .filter_map(io::Result::ok)
        .filter(|line| !line.trim().is_empty())
        .collect())
}
