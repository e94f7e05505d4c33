// Build script to load .env variables at compile time
fn main() {
    // Load .env file if it exists. Missing credentials only disable Google sign-in.
    if let Err(e) = dotenvy::dotenv() {
        println!("cargo:warning=No .env file loaded ({}), Google sign-in will fall back to demo mode", e);
    }

    // Read credentials from environment and pass to rustc
    let client_id = std::env::var("GOOGLE_CLIENT_ID").unwrap_or_default();
    let client_secret = std::env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default();

    if client_id.is_empty() {
        println!("cargo:warning=GOOGLE_CLIENT_ID is not set, see .env.example");
    }

    println!("cargo:rustc-env=GOOGLE_CLIENT_ID={}", client_id);
    println!("cargo:rustc-env=GOOGLE_CLIENT_SECRET={}", client_secret);
    println!("cargo:rerun-if-changed=.env");
    println!("cargo:rerun-if-env-changed=GOOGLE_CLIENT_ID");
    println!("cargo:rerun-if-env-changed=GOOGLE_CLIENT_SECRET");
}
