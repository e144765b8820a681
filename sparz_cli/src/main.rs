use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use sparz_codecs::{
    index_codec_by_id, value_codec_by_id, DeltaVbyteCodec, MantissaCodec, RawValueCodec,
    MAX_PRECISION,
};
use sparz_core::format::{KIND_MATRIX, KIND_VECTOR};
use sparz_core::{
    read_archive, write_matrix, write_vector, Archive, DenseMatrix, SparseCompressor, ValueCodec,
};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "sparz",
    about = "Archive sparse f32 vectors and matrices as compact SPZ1 files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress raw little-endian f32 data into an SPZ1 archive
    Compress {
        /// Source file of raw little-endian f32 words
        input: PathBuf,
        /// Destination SPZ1 file
        output: PathBuf,
        /// Treat the input as a row-major matrix with this many rows
        #[arg(long, requires = "cols")]
        rows: Option<u64>,
        /// Number of matrix columns
        #[arg(long, requires = "rows")]
        cols: Option<u64>,
        /// Value codec: mantissa | raw
        #[arg(short, long, default_value = "mantissa")]
        value_codec: String,
        /// Retained mantissa bits (0–23, only used with --value-codec mantissa)
        #[arg(short, long, default_value_t = MAX_PRECISION)]
        precision: u32,
    },
    /// Reconstruct the dense f32 data from an SPZ1 archive
    Decompress {
        /// Source SPZ1 file
        input: PathBuf,
        /// Destination file of raw little-endian f32 words
        output: PathBuf,
    },
    /// Print header metadata and stream statistics
    Inspect {
        /// SPZ1 file to inspect
        file: PathBuf,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn value_codec_from_name(name: &str) -> anyhow::Result<Box<dyn ValueCodec>> {
    match name {
        "mantissa" | "m" => Ok(Box::new(MantissaCodec)),
        "raw" | "r" | "none" => Ok(Box::new(RawValueCodec)),
        other => anyhow::bail!("unknown value codec '{}'. Valid options: mantissa, raw", other),
    }
}

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{n} B")
    } else {
        format!("{v:.2} {}", UNITS[unit])
    }
}

fn read_f32_file(path: &Path) -> anyhow::Result<Vec<f32>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("reading input file {}", path.display()))?;
    if bytes.len() % 4 != 0 {
        anyhow::bail!(
            "{} is {} bytes, not a multiple of 4 — not raw f32 data",
            path.display(),
            bytes.len()
        );
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
        .collect())
}

fn write_f32_file(path: &Path, values: &[f32]) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating output file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for value in values {
        out.write_all(&value.to_le_bytes())?;
    }
    out.flush()?;
    Ok(())
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_compress(
    input: PathBuf,
    output: PathBuf,
    shape: Option<(u64, u64)>,
    value_codec_name: &str,
    precision: u32,
) -> anyhow::Result<()> {
    let values = read_f32_file(&input)?;
    let value_codec = value_codec_from_name(value_codec_name)?;
    let codec_display = value_codec.name().to_string();
    let compressor = SparseCompressor::new(Box::new(DeltaVbyteCodec), value_codec);

    let element_count = values.len();
    let nonzero_count = values.iter().filter(|v| **v != 0.0).count();
    let t0 = Instant::now();

    match shape {
        Some((rows, cols)) => {
            if rows * cols != element_count as u64 {
                anyhow::bail!(
                    "{rows}x{cols} matrix needs {} elements but the input has {element_count}",
                    rows * cols
                );
            }
            let matrix = DenseMatrix::from_vec(rows as usize, cols as usize, values)?;
            let archive = compressor.compress_matrix(&matrix, precision)?;
            write_matrix(
                &output,
                &archive,
                compressor.index_codec_id(),
                compressor.value_codec_id(),
            )?;
        }
        None => {
            let archive = compressor.compress_vector(&values, precision)?;
            if !archive.is_valid() {
                eprintln!("input is empty or all zero — wrote an empty sentinel archive");
            }
            write_vector(
                &output,
                &archive,
                compressor.index_codec_id(),
                compressor.value_codec_id(),
            )?;
        }
    }

    let elapsed = t0.elapsed();
    let raw_size = element_count as u64 * 4;
    let file_size = std::fs::metadata(&output)?.len();

    eprintln!("  value codec : {codec_display}");
    eprintln!("  precision   : {} bits", precision.min(MAX_PRECISION));
    eprintln!("  elements    : {element_count}");
    eprintln!(
        "  nonzeros    : {nonzero_count} ({:.2}% dense)",
        100.0 * nonzero_count as f64 / element_count.max(1) as f64
    );
    eprintln!("  raw size    : {}", human_bytes(raw_size));
    eprintln!("  archive     : {}", human_bytes(file_size));
    eprintln!("  ratio       : {:.2}x", raw_size as f64 / file_size as f64);
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_decompress(input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let (header, archive) = read_archive(&input)?;
    let compressor = SparseCompressor::new(
        index_codec_by_id(header.index_codec_id)?,
        value_codec_by_id(header.value_codec_id)?,
    );

    let t0 = Instant::now();
    let values = match &archive {
        Archive::Vector(vector) => compressor.decompress_vector(vector)?,
        Archive::Matrix(matrix) => {
            let dense = compressor.decompress_matrix(matrix)?;
            dense.as_slice().to_vec()
        }
    };
    let elapsed = t0.elapsed();

    write_f32_file(&output, &values)?;

    eprintln!("  elements    : {}", values.len());
    eprintln!("  raw size    : {}", human_bytes(values.len() as u64 * 4));
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_inspect(file: PathBuf) -> anyhow::Result<()> {
    let (header, archive) = read_archive(&file)?;
    let file_size = std::fs::metadata(&file)?.len();

    let kind = match header.kind {
        KIND_VECTOR => "vector",
        KIND_MATRIX => "matrix",
        _ => "unknown",
    };
    let index_codec = index_codec_by_id(header.index_codec_id)?;
    let value_codec = value_codec_by_id(header.value_codec_id)?;

    let (element_count, shape) = match &archive {
        Archive::Vector(v) => (v.original_length(), format!("{}", v.original_length())),
        Archive::Matrix(m) => (m.rows() * m.cols(), format!("{}x{}", m.rows(), m.cols())),
    };

    println!("=== SPZ1 archive: {} ===", file.display());
    println!();
    println!("  format version : {}", header.version);
    println!("  kind           : {kind} ({shape})");
    println!(
        "  index codec    : {} (id={})",
        index_codec.name(),
        header.index_codec_id
    );
    println!(
        "  value codec    : {} (id={})",
        value_codec.name(),
        header.value_codec_id
    );
    println!("  nonzeros       : {}", header.nonzero_count);
    if element_count > 0 {
        println!(
            "  density        : {:.2}%",
            100.0 * header.nonzero_count as f64 / element_count as f64
        );
    }
    println!("  index stream   : {}", human_bytes(header.index_len as u64));
    println!("  value stream   : {}", human_bytes(header.value_len as u64));
    println!("  file on disk   : {}", human_bytes(file_size));
    if element_count > 0 {
        println!(
            "  ratio          : {:.2}x",
            (element_count * 4) as f64 / file_size as f64
        );
    }
    println!("  index checksum : {:016x}", header.index_checksum);
    println!("  value checksum : {:016x}", header.value_checksum);

    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Compress {
            input,
            output,
            rows,
            cols,
            value_codec,
            precision,
        } => {
            let shape = rows.zip(cols);
            run_compress(input, output, shape, &value_codec, precision)
        }
        Commands::Decompress { input, output } => run_decompress(input, output),
        Commands::Inspect { file } => run_inspect(file),
    }
}
