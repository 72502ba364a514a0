//! Example: Load and inspect a JSON scene file.
//!
//! Run with: cargo run --example load_scene -- scene.json
//! Without an argument the built-in `materials` preset is printed as JSON.

use std::env;

use rt_scene::{load_scene, MaterialDescription, ScenePreset, DEFAULT_SCENE_SEED};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_scene <path-to-scene.json>");
        println!("\nExample scene:");
        let scene = ScenePreset::Materials.build(DEFAULT_SCENE_SEED);
        match scene.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize preset: {}", e),
        }
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!("\n=== Camera ===");
            println!("  from {:?} to {:?}", scene.camera.look_from, scene.camera.look_at);
            println!(
                "  vfov {}°, aperture {}, focus {}",
                scene.camera.vfov,
                scene.camera.aperture,
                scene.camera.focus_distance()
            );
            println!("Background: {:?}", scene.background);

            println!("\n--- Objects ({}) ---", scene.objects.len());
            for (i, sphere) in scene.objects.iter().enumerate() {
                let kind = match sphere.material {
                    MaterialDescription::Lambertian { .. } => "lambertian",
                    MaterialDescription::Metal { .. } => "metal",
                    MaterialDescription::Dielectric { .. } => "dielectric",
                };
                println!(
                    "  [{}] {} sphere at {:?}, r = {}",
                    i, kind, sphere.center, sphere.radius
                );
            }
        }
        Err(e) => {
            eprintln!("Failed to load scene: {}", e);
            std::process::exit(1);
        }
    }
}
