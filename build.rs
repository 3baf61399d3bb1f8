use std::path::PathBuf;
use std::{env, io};

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    let descriptor_path = PathBuf::from(out_dir).join("descriptor.bin");

    let protos = glob::glob("./proto/mangashelf/**/*.proto")
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?
        .collect::<Result<Vec<PathBuf>, glob::GlobError>>()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    tonic_build::configure()
        .file_descriptor_set_path(descriptor_path)
        .build_client(false)
        .compile_protos(protos.as_slice(), &[PathBuf::from("proto")])?;

    println!("cargo:rerun-if-changed=proto");
    Ok(())
}
