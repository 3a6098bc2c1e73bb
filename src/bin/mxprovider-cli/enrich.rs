use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use mxprovider_lib::{LookupOptions, MxLookup, ProviderRules, enrich_csv};

pub async fn run<L>(
    input: &str,
    out: Option<&str>,
    lookup: &L,
    rules: &ProviderRules,
    options: &LookupOptions,
) -> Result<()>
where
    L: MxLookup + ?Sized,
{
    let bytes = read_input(input)?;
    let csv = enrich_csv(&bytes, lookup, rules, options)
        .await
        .with_context(|| format!("enrich {input}"))?;

    match out {
        Some(path) => write_all_atomically(path, &csv).with_context(|| format!("write {path}")),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&csv).context("write stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf).context("read stdin")?;
        Ok(buf)
    } else {
        std::fs::read(input).with_context(|| format!("read {input}"))
    }
}

fn write_all_atomically(path: &str, bytes: &[u8]) -> Result<()> {
    let tmp = format!("{}.tmp", path);
    let written = write_then_rename(&tmp, path, bytes);
    if written.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    written
}

fn write_then_rename(tmp: &str, path: &str, bytes: &[u8]) -> Result<()> {
    {
        let mut f = std::fs::File::create(tmp)?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }
    std::fs::rename(tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.csv");
        std::fs::write(&path, b"old").unwrap();
        let path = path.to_str().unwrap();

        write_all_atomically(path, b"email,mx,emailprovider\n").expect("written");

        assert_eq!(std::fs::read(path).unwrap(), b"email,mx,emailprovider\n");
        assert!(!std::path::Path::new(&format!("{path}.tmp")).exists());
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // renaming a file over a non-empty directory fails
        let target = dir.path().join("out");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), b"x").unwrap();
        let path = target.to_str().unwrap();

        assert!(write_all_atomically(path, b"data").is_err());
        assert!(!std::path::Path::new(&format!("{path}.tmp")).exists());
        assert!(target.join("keep").exists());
    }
}
