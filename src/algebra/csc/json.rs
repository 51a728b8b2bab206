use crate::algebra::{CscMatrix, FloatT};
use serde::{de::DeserializeOwned, Serialize};
use std::io::{Read, Write};
use std::{fs::File, io};

impl<T> CscMatrix<T>
where
    T: FloatT + Serialize + DeserializeOwned,
{
    /// Write the matrix to a file in JSON format
    pub fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        let json = serde_json::to_string(self)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Read a matrix from a JSON file.   The matrix data is validated
    /// with [`check_format`](CscMatrix::check_format) before it is returned.
    pub fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let mut buffer = String::new();
        file.read_to_string(&mut buffer)?;
        let A: CscMatrix<T> = serde_json::from_str(&buffer)?;
        A.check_format()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(A)
    }
}
