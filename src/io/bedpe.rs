//! Writing of structural variations as BEDPE.

use crate::mutations::StructuralVariation;

/// Header line written ahead of the records.
pub const HEADER: &str = "#chrom1\tstart1\tend1\tchrom2\tstart2\tend2\tname\tscore\tstrand1\tstrand2";

/// Write structural variations to a BEDPE file.
///
/// Each breakpoint becomes a one-position range `[pos, pos + 1]`; the name
/// column is derived from the breakpoint coordinates, the score column is
/// left empty, and unknown strands are written as `.`.
pub fn write_svs<W: std::io::Write>(
    writer: W,
    svs: &[StructuralVariation],
) -> Result<(), anyhow::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .from_writer(writer);

    csv_writer.write_record(HEADER.split('\t'))?;
    for sv in svs {
        let start1 = sv.pos1.to_string();
        let end1 = (sv.pos1 + 1).to_string();
        let start2 = sv.pos2.to_string();
        let end2 = (sv.pos2 + 1).to_string();
        let name = format!("{}_{}_{}_{}", sv.chrom1, sv.pos1, sv.chrom2, sv.pos2);
        let strand1 = sv.strand1.map_or(".".to_owned(), |strand| strand.to_string());
        let strand2 = sv.strand2.map_or(".".to_owned(), |strand| strand.to_string());
        csv_writer.write_record([
            sv.chrom1.as_str(),
            start1.as_str(),
            end1.as_str(),
            sv.chrom2.as_str(),
            start2.as_str(),
            end2.as_str(),
            name.as_str(),
            "",
            strand1.as_str(),
            strand2.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use pretty_assertions::assert_eq;

    use crate::common::Strand;
    use crate::mutations::SvType;

    use super::*;

    fn example_sv() -> StructuralVariation {
        StructuralVariation {
            chrom1: "1".to_owned(),
            pos1: 1000,
            strand1: Some(Strand::Forward),
            chrom2: "2".to_owned(),
            pos2: 2000,
            strand2: Some(Strand::Reverse),
            sv_type: SvType::Translocation,
        }
    }

    #[test]
    fn write_svs_smoke() -> Result<(), anyhow::Error> {
        let mut buffer = Vec::new();
        write_svs(&mut buffer, &[example_sv()])?;
        let text = String::from_utf8(buffer)?;
        let expected = concat!(
            "#chrom1\tstart1\tend1\tchrom2\tstart2\tend2\tname\tscore\tstrand1\tstrand2\n",
            "1\t1000\t1001\t2\t2000\t2001\t1_1000_2_2000\t\t+\t-\n",
        );
        assert_eq!(text, expected);
        Ok(())
    }

    #[test]
    fn write_svs_to_file() -> Result<(), anyhow::Error> {
        let tmp_dir = tempfile::tempdir()?;
        let path = tmp_dir.path().join("out.bedpe");
        {
            let file = std::fs::File::create(&path)?;
            let mut sv = example_sv();
            sv.strand1 = None;
            write_svs(file, &[sv])?;
        }
        let mut text = String::new();
        std::fs::File::open(&path)?.read_to_string(&mut text)?;
        assert!(text.starts_with("#chrom1\t"));
        assert!(text.contains("\t.\t-\n"));
        Ok(())
    }
}
