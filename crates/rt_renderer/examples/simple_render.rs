//! Simple path tracer example.
//!
//! Builds a small scene by hand, renders it in parallel and saves a PPM.

use std::time::Instant;

use rt_renderer::{
    Background, Camera, CameraSettings, Color, Material, RenderConfig, RenderResult, Renderer,
    Scene, Sphere, Vec3, DEFAULT_BUCKET_SIZE,
};

fn main() -> RenderResult<()> {
    env_logger::init();

    println!("Path Tracer - Simple Example");
    println!("============================");

    let start = Instant::now();
    let scene = build_scene()?;
    println!("Scene built in {:?} ({} objects)", start.elapsed(), scene.len());

    let config = RenderConfig::new(800, 450, 50).with_max_depth(10).with_seed(42);

    let look_from = Vec3::new(0.0, 1.0, 3.0);
    let look_at = Vec3::new(0.0, 0.0, -1.0);
    let settings = CameraSettings::new()
        .with_position(look_from, look_at, Vec3::Y)
        .with_lens(40.0, 0.1, (look_from - look_at).length());
    let camera = Camera::new(&settings, config.aspect_ratio())?;

    println!(
        "Rendering {}x{} @ {} spp...",
        config.width, config.height, config.samples_per_pixel
    );

    let renderer = Renderer::with_scene(config, scene, camera, Background::Sky)?;
    let start = Instant::now();
    let image = renderer.render_parallel(DEFAULT_BUCKET_SIZE)?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    image.save(filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> RenderResult<Scene> {
    let ground = Material::lambertian(Color::new(0.5, 0.5, 0.5))?;
    let diffuse = Material::lambertian(Color::new(0.4, 0.2, 0.1))?;
    let glass = Material::dielectric(1.5)?;
    let gold = Material::metal(Color::new(0.8, 0.6, 0.2), 0.05)?;

    Ok(Scene::new()
        .with(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground)?)
        .with(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)?)
        .with(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, diffuse)?)
        .with(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, gold)?))
}
