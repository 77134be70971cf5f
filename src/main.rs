// This binary crate is intentionally minimal.
// All neural network logic lives in the library (src/lib.rs and its modules).
// Run demos with:
//   cargo run --example xor
fn main() {
    println!("lamina-nn: a from-scratch feedforward neural network in Rust.");
    println!("Run `cargo run --example xor` to see the XOR demo.");
}
