//! Built-in scenes implementing `scene::SceneBuilder`, replacing the
//! teacher's `sdl`/`sdl_grammar` textual scene-description language (parsed
//! scene files and `dlopen`-loaded world modules are out of scope). Each
//! demo here is grounded on one of `original_source/raytrace/demo/*.hpp`'s
//! hand-written `add_to`-style world builders, expressed as a plain Rust
//! type instead of a `.rt` script.

mod spheres;

pub use self::spheres::Spheres;
