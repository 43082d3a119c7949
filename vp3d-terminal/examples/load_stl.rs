/// Example: Load and render an STL file in the terminal
///
/// Usage: cargo run --example load_stl -- path/to/file.stl

use std::env;
use std::fs;
use std::io;
use vp3d_core::stl;
use vp3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <stl-file>", args[0]);
        eprintln!("\nNo STL file provided, using default cube...");
        let mut app = TerminalApp::with_default_scene()?;
        return app.run();
    }

    let stl_path = &args[1];

    println!("Loading STL file: {}", stl_path);

    // Read STL file
    let data = fs::read(stl_path)
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, format!("Failed to read STL file: {}", e)))?;

    // Parse STL
    let mut mesh = stl::parse_stl(&data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse STL: {}", e)))?;

    // Fit the model inside a radius-2 sphere in front of the camera
    let radius = mesh
        .vertices
        .iter()
        .map(|v| v.norm())
        .fold(0.0f32, f32::max);
    if radius > 0.0 {
        mesh.transform.scale_by(2.0 / radius);
    }
    mesh.transform.position.z = -2.0;

    println!("Loaded {} triangles", mesh.faces.len());
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    // Run the terminal app
    let mut app = TerminalApp::new(vec![mesh])?;
    app.run()?;

    println!("Thank you for using VP3D Terminal Renderer!");
    Ok(())
}
