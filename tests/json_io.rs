#![allow(non_snake_case)]

#[cfg(feature = "serde")]
#[test]
fn test_json_io() {
    use sparseqr::{algebra::*, qr::*};
    use std::io::{Seek, SeekFrom};

    let A = CscMatrix::new(
        3,
        2,
        vec![0, 2, 4],
        vec![0, 1, 1, 2],
        vec![1.0, -2.5, 3.0, 0.125],
    );

    // write the matrix to a file
    let mut file = tempfile::tempfile().unwrap();
    A.write_to_file(&mut file).unwrap();

    // read the matrix from the file
    file.seek(SeekFrom::Start(0)).unwrap();
    let B = CscMatrix::<f64>::read_from_file(&mut file).unwrap();
    assert_eq!(A, B);

    // and the factors agree
    let mut qr = SparseQR::new(None);
    let dA = qr.factor(&A).unwrap().diagonal();
    let dB = qr.factor(&B).unwrap().diagonal();
    assert_eq!(dA, dB);
}

#[cfg(feature = "serde")]
#[test]
fn test_json_io_bad_data() {
    use sparseqr::algebra::*;
    use std::io::{Seek, SeekFrom, Write};

    // row index out of bounds
    let json = r#"{"m":2,"n":1,"colptr":[0,1],"rowval":[5],"nzval":[1.0]}"#;
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    file.seek(SeekFrom::Start(0)).unwrap();
    let err = CscMatrix::<f64>::read_from_file(&mut file).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}
