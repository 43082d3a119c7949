/// VP3D Terminal Demo - Viewport modes on a cube
///
/// Demonstrates the viewport renderer on a character-cell canvas.
/// Controls:
///   - 1/2/3/4: Wireframe / Solid / Material / Rendered
///   - W: Toggle wireframe overlay
///   - B: Toggle backface culling
///   - Arrow Keys: Rotate the cube, E: Roll
///   - +/-: Zoom, R: Reset
///   - Q/ESC: Quit

use std::io;
use vp3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    env_logger::init();
    println!("VP3D Terminal Renderer - Loading...");

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    // Run the terminal app
    let mut app = TerminalApp::with_default_scene()?;
    app.run()?;

    println!("Thank you for using VP3D Terminal Renderer!");
    Ok(())
}
