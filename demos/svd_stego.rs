// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Example: hide a message in an image, or read it back.
use std::fs;

use phasm_svd::{decode_bytes, encode_bytes, max_message_len, raster, StegoConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: svd_stego <cover-image> <message> [output.png]");
        eprintln!("       svd_stego --decode <stego.png>");
        std::process::exit(1);
    }

    let config = StegoConfig::default();

    if args[1] == "--decode" {
        let stego = fs::read(&args[2]).expect("Could not read stego image");
        match decode_bytes(&stego, &config) {
            Ok(message) => println!("Decoded message: {message}"),
            Err(e) => eprintln!("Decode failed: {e}"),
        }
    } else {
        let cover = fs::read(&args[1]).expect("Could not read cover image");
        let message = &args[2];

        if let Ok(img) = raster::load_rgb(&cover) {
            let (w, h) = img.dimensions();
            println!("Cover {w}x{h}, room for {} characters", max_message_len(w, h, &config));
        }

        let stego = match encode_bytes(&cover, message, &config) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Encode failed: {e}");
                std::process::exit(1);
            }
        };

        let out_path = args.get(3).cloned().unwrap_or_else(|| {
            let stem = args[1].rsplit_once('.').map_or(args[1].as_str(), |(s, _)| s);
            format!("{stem}_stego.png")
        });
        fs::write(&out_path, &stego).expect("Could not write output");
        println!("Stego image written to: {out_path}");
    }
}
