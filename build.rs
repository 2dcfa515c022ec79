fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto");

    // Fall back to the vendored protoc when the host has none
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    tonic_build::compile_protos("proto/embed.proto")?;
    tonic_build::compile_protos("proto/translate.proto")?;
    Ok(())
}
