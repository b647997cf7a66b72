//! Reading of BED interval files.

use crate::common::GenomicInterval;

/// Read genomic intervals from a BED file.
///
/// Only the first three columns (chromosome, start, end) are interpreted;
/// additional columns are ignored.  The coordinates are taken verbatim,
/// reversed bounds are normalized by interval construction.  Lines starting
/// with `#` are skipped.
pub fn read_intervals<R: std::io::Read>(
    reader: R,
) -> Result<Vec<GenomicInterval>, anyhow::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let mut result = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let chrom = record
            .get(0)
            .ok_or_else(|| anyhow::anyhow!("BED record without columns"))?;
        let start: i64 = record
            .get(1)
            .ok_or_else(|| anyhow::anyhow!("BED record without start column: {:?}", chrom))?
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid BED start position: {}", e))?;
        let end: i64 = record
            .get(2)
            .ok_or_else(|| anyhow::anyhow!("BED record without end column: {:?}", chrom))?
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid BED end position: {}", e))?;
        result.push(GenomicInterval::new(chrom, start, end));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn read_intervals_smoke() -> Result<(), anyhow::Error> {
        let bed = "#chrom\tstart\tend\n1\t1000\t2000\nX\t500\t600\tsome-name\t42\n";
        let intervals = read_intervals(bed.as_bytes())?;
        assert_eq!(
            intervals,
            vec![
                GenomicInterval::new("1", 1000, 2000),
                GenomicInterval::new("X", 500, 600),
            ]
        );
        Ok(())
    }

    #[test]
    fn read_intervals_rejects_non_numeric_coordinates() {
        let bed = "1\tstart\tend\n";
        assert!(read_intervals(bed.as_bytes()).is_err());
    }

    #[test]
    fn read_intervals_requires_three_columns() {
        let bed = "1\t1000\n";
        assert!(read_intervals(bed.as_bytes()).is_err());
    }
}
