fn main() {
    let server_name = format!(
        "r-bk-http/{}.{}.{}",
        env!("CARGO_PKG_VERSION_MAJOR"),
        env!("CARGO_PKG_VERSION_MINOR"),
        env!("CARGO_PKG_VERSION_PATCH")
    );
    println!("cargo:rustc-env=DEFAULT_SERVER_NAME={}", server_name);
}
