// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::warn;

use gridstep::audio::{AudioPlayer, NullPlayer, ToneSampler};
use gridstep::config::StudioConfig;
use gridstep::grid::legal_start;
use gridstep::input::PointerState;
use gridstep::music::NoteDuration;
use gridstep::studio::Studio;

fn print_usage() {
    println!("GRIDSTEP - Grid Step Sequencer");
    println!();
    println!("Usage: gridstep [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --legality              Print the rhythmic legality table for one measure");
    println!("  --simulate [FILE]       Place a demo arrangement and play it through once");
    println!("  --export <FILE>         Render a demo arrangement to a PNG file");
    println!("  --check-config <FILE>   Validate a YAML configuration file");
    println!("  --help                  Show this help message");
}

/// Print which start columns accept each duration in one measure
fn print_legality() {
    let config = StudioConfig::default();
    println!(
        "Legal start columns per duration (measure of {} slots)",
        config.measure_len
    );
    println!();

    print!("{:12}", "");
    for col in 0..config.measure_len {
        print!("{:3}", col);
    }
    println!();

    for duration in NoteDuration::ALL {
        print!("{:12}", duration.name());
        for col in 0..config.measure_len {
            let mark = if legal_start(col, duration.units(), config.measure_len) {
                "x"
            } else {
                "."
            };
            print!("{:>3}", mark);
        }
        println!();
    }
}

/// Drive a full drag gesture through the studio update loop
fn drag(studio: &mut Studio, duration: NoteDuration, slot: usize, now_ms: f64) -> bool {
    let Some(start) = studio
        .notes()
        .iter()
        .find(|n| n.duration() == duration && !n.is_slotted())
        .map(|n| n.rect().center())
    else {
        return false;
    };
    let Some(target) = studio.grid().slot(slot).map(|s| s.rect.center()) else {
        return false;
    };

    studio.update(&PointerState::touch_down(start.x, start.y), now_ms);
    let held = studio.dragged_note();
    studio.update(&PointerState::held(target.x, target.y), now_ms);
    studio.update(&PointerState::touch_up(target.x, target.y), now_ms);

    held.map(|id| studio.notes()[id].is_slotted()).unwrap_or(false)
}

/// A small arrangement across the grid for demo runs
fn place_demo_notes(studio: &mut Studio) {
    let cols = studio.grid().cols();
    let placements = [
        (NoteDuration::Quarter, 2),
        (NoteDuration::Quarter, cols + 6),
        (NoteDuration::Half, 4 * cols + 12),
        (NoteDuration::Eighth, 7 * cols + 17),
        (NoteDuration::Quarter, 9 * cols + 22),
    ];
    for (duration, slot) in placements {
        if !drag(studio, duration, slot, 0.0) {
            warn!("Demo placement of {} at slot {} rejected", duration.name(), slot);
        }
    }
}

/// Open the audio backend, falling back to silence without a device
fn open_audio(bpm: f64) -> Box<dyn AudioPlayer> {
    match ToneSampler::new(bpm) {
        Ok(sampler) => Box::new(sampler),
        Err(e) => {
            warn!("Audio unavailable ({}); running silent", e);
            Box::new(NullPlayer)
        }
    }
}

/// Place the demo arrangement and run one full playback pass in real
/// time
fn simulate(config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => StudioConfig::load(path)?,
        None => StudioConfig::default(),
    };
    let bpm = config.bpm;
    let mut studio = Studio::new(config, open_audio(bpm))?;

    place_demo_notes(&mut studio);
    let placed = studio.notes().iter().filter(|n| n.is_slotted()).count();
    println!("Placed {} notes", placed);

    studio.play();
    println!("Playing {} triggers at {} BPM...", studio.sequence().len(), bpm);

    let idle = PointerState::idle(0.0, 0.0);
    let start = Instant::now();
    loop {
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;
        studio.update(&idle, now_ms);
        if studio.playhead().is_paused() {
            break;
        }
        thread::sleep(Duration::from_millis(16));
    }

    // Let the last notes ring out
    thread::sleep(Duration::from_millis(500));
    println!("Playback complete");
    Ok(())
}

fn export(path: &str) -> Result<()> {
    let mut studio = Studio::new(StudioConfig::default(), Box::new(NullPlayer))?;
    place_demo_notes(&mut studio);
    studio.export_png(path)?;
    println!("Wrote {}", path);
    Ok(())
}

fn check_config(path: &str) -> Result<()> {
    let config = StudioConfig::load(path)?;
    println!(
        "OK: {} rows x {} cols, measure {}, {} BPM, {}x{} canvas",
        config.rows,
        config.cols,
        config.measure_len,
        config.bpm,
        config.canvas_width,
        config.canvas_height
    );
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("GRIDSTEP - Grid Step Sequencer");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--legality" => {
            print_legality();
        }
        "--simulate" => {
            simulate(args.get(2).map(String::as_str))?;
        }
        "--export" => {
            if args.len() < 3 {
                eprintln!("Error: --export requires an output file");
                std::process::exit(1);
            }
            export(&args[2])?;
        }
        "--check-config" => {
            if args.len() < 3 {
                eprintln!("Error: --check-config requires a config file");
                std::process::exit(1);
            }
            check_config(&args[2])?;
        }
        "--help" => {
            print_usage();
        }
        other => {
            eprintln!("Unknown option: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
