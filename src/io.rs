use std::path::Path;

use anyhow::bail;
use polars::{
    io::{json::JsonReader, SerReader},
    lazy::frame::{IntoLazy, LazyCsvReader, LazyFileListReader, LazyFrame, LazyJsonLineReader},
};

/// Open a tabular data file as a lazy frame, dispatching on the extension.
/// CSV files are expected to carry a header row of channel names.
pub fn read_frame(path: impl AsRef<Path>) -> anyhow::Result<LazyFrame> {
    let Some(extension) = path.as_ref().extension() else {
        bail!(
            "No extension at the name of the file `{}`",
            path.as_ref().to_string_lossy()
        );
    };
    Ok(match extension.to_string_lossy().as_ref() {
        "csv" => LazyCsvReader::new(path.as_ref())
            .with_has_header(true)
            .finish()?,
        "json" => {
            let file = std::fs::File::options().read(true).open(&path)?;
            JsonReader::new(file).finish()?.lazy()
        }
        "ndjson" | "jsonl" => LazyJsonLineReader::new(path.as_ref()).finish()?,
        _ => bail!(
            "Unknown extension `{}` at the name of the file `{}`",
            extension.to_string_lossy(),
            path.as_ref().to_string_lossy()
        ),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        let err = read_frame("strain.txt").err().unwrap();
        assert!(err.to_string().contains("Unknown extension"));
    }

    #[test]
    fn missing_extension_is_rejected() {
        let err = read_frame("strain").err().unwrap();
        assert!(err.to_string().contains("No extension"));
    }

    #[test]
    fn reads_a_csv_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "time,strain").unwrap();
        writeln!(file, "0.0,1.5").unwrap();
        writeln!(file, "1.0,2.5").unwrap();

        let df = read_frame(&path).unwrap().collect().unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.column("strain").is_ok());
    }
}
