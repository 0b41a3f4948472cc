//! lzt-cli - Command-line interface for the lztriple codec
//!
//! A command-line tool for compressing and decompressing files with the LZ77
//! triple codec and its optional second-stage range coder.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use lztriple::{
    compress_bytes, decompress_bytes, BitReader, ContentType, DecodedContent, WindowConfig,
    DEFAULT_LOOK_AHEAD_BUFFER_SIZE, DEFAULT_SEARCH_BUFFER_SIZE,
};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lzt-cli")]
#[command(about = "A CLI tool for LZ77 triple compression and decompression")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into the ASCII bitstream format
    Compress {
        /// Input file to compress
        input: PathBuf,

        /// Output compressed file
        output: PathBuf,

        /// Search buffer size in symbols
        #[arg(long, default_value_t = DEFAULT_SEARCH_BUFFER_SIZE)]
        search_buffer_length: usize,

        /// Look-ahead buffer size in symbols
        #[arg(long, default_value_t = DEFAULT_LOOK_AHEAD_BUFFER_SIZE)]
        look_ahead_buffer_length: usize,

        /// Apply the second encoding step (range-coded offsets and lengths)
        #[arg(short = '2', long)]
        second_encoding_step: bool,

        /// Treat the input as a raster image of this width
        #[arg(long, requires = "image_height")]
        image_width: Option<usize>,

        /// Treat the input as a raster image of this height
        #[arg(long, requires = "image_width")]
        image_height: Option<usize>,

        /// The image has three channels (RGB) instead of one
        #[arg(long, requires = "image_width")]
        three_channel: bool,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress an ASCII bitstream file
    Decompress {
        /// Input compressed file
        input: PathBuf,

        /// Output decompressed file
        output: PathBuf,

        /// Force overwrite of output file
        #[arg(short, long)]
        force: bool,
    },

    /// Get information about a compressed file
    Info {
        /// Compressed file to analyze
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            search_buffer_length,
            look_ahead_buffer_length,
            second_encoding_step,
            image_width,
            image_height,
            three_channel,
            force,
        } => compress_file(
            &input,
            &output,
            search_buffer_length,
            look_ahead_buffer_length,
            second_encoding_step,
            image_width.zip(image_height),
            three_channel,
            force,
            cli.verbose,
            cli.quiet,
        ),
        Commands::Decompress {
            input,
            output,
            force,
        } => decompress_file(&input, &output, force, cli.verbose, cli.quiet),
        Commands::Info { input } => show_file_info(&input, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn compress_file(
    input: &PathBuf,
    output: &PathBuf,
    search_buffer_length: usize,
    look_ahead_buffer_length: usize,
    second_encoding_step: bool,
    image_dims: Option<(usize, usize)>,
    three_channel: bool,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    let config = WindowConfig::new(search_buffer_length, look_ahead_buffer_length)?;

    if verbose {
        println!(
            "Compressing '{}' to '{}'",
            input.display(),
            output.display()
        );
        println!(
            "Search buffer: {} symbols, look-ahead buffer: {} symbols, second stage: {}",
            search_buffer_length, look_ahead_buffer_length, second_encoding_step
        );
    }

    let start_time = Instant::now();

    let input_data = fs::read(input)?;
    let input_size = input_data.len();

    let content = match image_dims {
        Some((width, height)) => {
            let channels = if three_channel { 3 } else { 1 };
            if width * height * channels != input_size {
                return Err(format!(
                    "Image dimensions {}x{}x{} do not match {} input bytes",
                    width, height, channels, input_size
                )
                .into());
            }
            ContentType::image(width, height, three_channel)?
        }
        None => ContentType::Text,
    };

    if verbose {
        println!("Input size: {} bytes", input_size);
    }

    let progress = spinner(quiet, input_size, "Compressing...");
    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let compressed_data = compress_bytes(&input_data, content, config, second_encoding_step)
        .map_err(|e| format!("Compression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Compression complete");
    }

    fs::write(output, &compressed_data)?;

    let compression_time = start_time.elapsed();
    let output_size = compressed_data.len();
    // the on-disk form spends one byte per bit, so the meaningful figure is
    // the rate in bits per input symbol
    let rate = if input_size > 0 {
        compressed_data.len() as f64 / input_size as f64
    } else {
        0.0
    };

    if !quiet {
        println!("✓ Compression successful!");
        println!("  Input:  {} bytes", input_size);
        println!("  Output: {} bits (one byte per bit on disk)", output_size);
        println!("  Rate:   {:.5} bits per symbol", rate);
        println!("  Time:   {:.2?}", compression_time);
    }

    Ok(())
}

fn decompress_file(
    input: &PathBuf,
    output: &PathBuf,
    force: bool,
    verbose: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    if output.exists() && !force {
        return Err(format!(
            "Output file '{}' already exists. Use --force to overwrite",
            output.display()
        )
        .into());
    }

    if verbose {
        println!(
            "Decompressing '{}' to '{}'",
            input.display(),
            output.display()
        );
    }

    let start_time = Instant::now();

    let compressed_data = fs::read(input)?;
    let input_size = compressed_data.len();

    let progress = spinner(quiet, input_size, "Decompressing...");
    if let Some(ref pb) = progress {
        pb.inc(1);
    }

    let decoded = decompress_bytes(&compressed_data)
        .map_err(|e| format!("Decompression failed: {}", e))?;

    if let Some(ref pb) = progress {
        pb.inc(1);
        pb.finish_with_message("Decompression complete");
    }

    fs::write(output, &decoded.data)?;

    let decompression_time = start_time.elapsed();

    if !quiet {
        println!("✓ Decompression successful!");
        println!("  Input:  {} bits", input_size);
        println!("  Output: {} bytes", decoded.data.len());
        if let DecodedContent::Image {
            height,
            width,
            channels,
        } = decoded.content
        {
            println!("  Image:  {}x{} pixels, {} channel(s)", width, height, channels);
        }
        println!("  Time:   {:.2?}", decompression_time);
    }

    Ok(())
}

fn show_file_info(input: &PathBuf, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input file '{}' does not exist", input.display()).into());
    }

    let data = fs::read(input)?;
    let file_size = data.len();

    let mut reader = BitReader::from_ascii(&data)?;
    let header = lztriple::format::read_header(&mut reader)?;

    println!("lztriple File Information:");
    println!("  File: {}", input.display());
    println!("  Size: {} bits", file_size);
    match header.content {
        ContentType::Text => println!("  Content Type: text"),
        ContentType::Image {
            three_channel,
            dim_diff,
        } => {
            println!("  Content Type: image");
            println!("  Channels: {}", if three_channel { 3 } else { 1 });
            println!("  Width - height: {}", dim_diff);
        }
    }
    println!(
        "  Second encoding step: {}",
        if header.second_stage { "yes" } else { "no" }
    );

    if !header.second_stage {
        if let (Some(offset_bits), Some(length_bits)) = (reader.read_bits(5), reader.read_bits(5)) {
            println!("  Offset field width: {} bits", offset_bits);
            println!("  Length field width: {} bits", length_bits);
        }
    }

    match decompress_bytes(&data) {
        Ok(decoded) => {
            let decoded_size = decoded.data.len();
            println!("  Decompressed Size: {} bytes", decoded_size);
            if decoded_size > 0 {
                println!(
                    "  Rate: {:.5} bits per symbol",
                    file_size as f64 / decoded_size as f64
                );
            }
            if let DecodedContent::Image {
                height,
                width,
                channels,
            } = decoded.content
            {
                println!("  Dimensions: {}x{} pixels, {} channel(s)", width, height, channels);
            }
            println!("  Status: ✓ Valid lztriple file");
        }
        Err(e) => {
            println!("  Status: ✗ Invalid or corrupted lztriple file");
            if verbose {
                println!("  Error: {}", e);
            }
        }
    }

    Ok(())
}

fn spinner(quiet: bool, input_size: usize, message: &'static str) -> Option<ProgressBar> {
    if !quiet && input_size > 1024 * 1024 {
        let pb = ProgressBar::new(2);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(message);
        Some(pb)
    } else {
        None
    }
}
