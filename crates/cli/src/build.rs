use std::fmt::{self, Display};
use std::fs;
use std::io;
use std::path::{absolute, Path};
use std::process::Command;
use std::time::Instant;

use lol_html::html_content::{ContentType, Element};
use lol_html::{element, rewrite_str, RewriteStrSettings};

use crate::log;
use crate::manifest::{manifest, Manifest};
use crate::report::{Context, Error, Report};
use crate::Build;

pub fn build(b: &Build) -> Report<()> {
    let Manifest {
        crate_name,
        crate_version,
        mut target,
    } = manifest()?;

    log::status!("Building", "{crate_name} v{crate_version}");

    build_wasm(b.release)?;

    target.push("wasm32-unknown-unknown");
    target.push(if b.release { "release" } else { "debug" });
    target.push(&crate_name);
    target.set_extension("wasm");

    if !target.exists() {
        return Err(Error::message(format!(
            "couldn't find compiled .wasm: {}",
            target.display(),
        )));
    }

    let start = Instant::now();

    run_wasm_bindgen(&target, &b.dist)?;

    let mut wasm = b.dist.join(format!("{crate_name}_bg"));
    wasm.set_extension("wasm");

    if b.release {
        optimize_wasm(&wasm)?;
    }

    let mut js = b.dist.join(&crate_name);
    js.set_extension("js");

    copy_stylesheets(&b.dist)?;

    let index = b.dist.join("index.html");
    make_index_html(MakeIndex {
        orig_index: Path::new("index.html"),
        dist: Dist(&b.dist),
        wasm: &wasm,
        js: &js,
        index: &index,
        embed_reload_script: !b.release,
    })?;

    let elapsed = start.elapsed();
    let dist = absolute(&b.dist).context("failed to get absolute path")?;
    log::status!("Finished", "`{}` in {elapsed:.2?}", dist.display());

    Ok(())
}

fn build_wasm(release: bool) -> Report<()> {
    let mut cargo = Command::new("cargo");
    cargo.args(["build", "--target=wasm32-unknown-unknown"]);

    if release {
        cargo.arg("--release");
    }

    let status = cargo
        .spawn()
        .context("failed to run cargo")?
        .wait()
        .context("failed to build cargo crate")?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::message("failed to build cargo crate"))
    }
}

fn run_wasm_bindgen(target: &Path, dist: &Path) -> Report<()> {
    let out = Command::new("wasm-bindgen")
        .arg(target)
        .arg("--out-dir")
        .arg(dist)
        .args(["--target=web", "--no-typescript"])
        .output()
        .context("failed to run wasm-bindgen")?;

    if out.status.success() {
        Ok(())
    } else {
        let err = String::from_utf8_lossy(&out.stderr);
        Err(Error::message(format!("failed to run wasm-bindgen\n{err}")))
    }
}

fn optimize_wasm(file: &Path) -> Report<()> {
    Command::new("wasm-opt")
        .arg("-Os")
        .arg(file)
        .arg("-o")
        .arg(file)
        .args(["--enable-simd", "--low-memory-unused"])
        .spawn()
        .context("failed to run wasm-opt")?
        .wait()
        .context("failed to optimize wasm")?;

    Ok(())
}

/// Copy every stylesheet next to `index.html` into the dist directory.
fn copy_stylesheets(dist: &Path) -> Report<()> {
    let entries = fs::read_dir(".").context("failed to read current directory")?;

    for entry in entries {
        let path = entry.context("failed to read current directory")?.path();

        if path.extension().is_some_and(|ext| ext == "css") {
            let Some(name) = path.file_name() else {
                continue;
            };

            log::info!("copying {} to dist", path.display());

            fs::copy(&path, dist.join(name))
                .with_context(|| format!("failed to copy {}", path.display()))?;
        }
    }

    Ok(())
}

#[derive(Clone, Copy)]
struct Dist<'path>(&'path Path);

impl Dist<'_> {
    fn embed_path(self, path: &Path) -> impl Display + use<'_> {
        struct Show<'path>(&'path Path);

        impl Display for Show<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "/{}", self.0.display())
            }
        }

        Show(
            path.strip_prefix(self.0)
                .expect("the path must have dist prefix"),
        )
    }
}

struct MakeIndex<'path> {
    orig_index: &'path Path,
    dist: Dist<'path>,
    wasm: &'path Path,
    js: &'path Path,
    index: &'path Path,
    embed_reload_script: bool,
}

fn make_index_html(m: MakeIndex) -> Report<()> {
    let html = fs::read_to_string(m.orig_index)
        .or_else(|err| {
            if err.kind() == io::ErrorKind::NotFound {
                Ok(include_str!("../default/index.html").to_owned())
            } else {
                Err(err)
            }
        })
        .with_context(|| format!("failed to read {}", m.orig_index.display()))?;

    let html_new = rewrite_index(&html, &m)?;

    fs::write(m.index, html_new)
        .with_context(|| format!("failed to write {} file", m.index.display()))?;

    Ok(())
}

fn rewrite_index(html: &str, m: &MakeIndex) -> Report<String> {
    let js = m.dist.embed_path(m.js).to_string();
    let wasm = m.dist.embed_path(m.wasm).to_string();

    let links = format!(
        "<link rel=\"modulepreload\" href=\"{js}\" crossorigin=anonymous>\
         <link rel=\"preload\" href=\"{wasm}\" crossorigin=anonymous as=\"fetch\" type=\"application/wasm\">",
    );

    let script = format!(
        "<script type=\"module\">\n\
            import init from '{js}';\n\
            await init({{ module_or_path: '{wasm}' }});\n\
        </script>\n",
    );

    let mut embed_links = Some(|el: &mut Element| {
        el.append(&links, ContentType::Html);
    });

    let mut embed_script = Some(|el: &mut Element| {
        el.append(&script, ContentType::Html);

        if m.embed_reload_script {
            el.append("<script>", ContentType::Html);
            el.append(include_str!("../reload.js"), ContentType::Html);
            el.append("</script>", ContentType::Html);
        }
    });

    let settings = RewriteStrSettings {
        element_content_handlers: vec![
            element!("head", |el| {
                if let Some(f) = embed_links.take() {
                    f(el);
                }

                Ok(())
            }),
            element!("body", |el| {
                if let Some(f) = embed_script.take() {
                    f(el);
                }

                Ok(())
            }),
        ],
        ..RewriteStrSettings::new()
    };

    let html_new = rewrite_str(html, settings)
        .map_err(|err| Error::message(format!("failed to rewrite html: {err}")))?;

    if embed_links.is_some() {
        return Err(Error::message(format!(
            "<head> tag not found in {} file",
            m.orig_index.display(),
        )));
    }

    if embed_script.is_some() {
        return Err(Error::message(format!(
            "<body> tag not found in {} file",
            m.orig_index.display(),
        )));
    }

    Ok(html_new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_index(dist: &'static str, reload: bool) -> MakeIndex<'static> {
        MakeIndex {
            orig_index: Path::new("index.html"),
            dist: Dist(Path::new(dist)),
            wasm: Path::new("dist/counter_bg.wasm"),
            js: Path::new("dist/counter.js"),
            index: Path::new("dist/index.html"),
            embed_reload_script: reload,
        }
    }

    #[test]
    fn injects_links_and_bootstrap() {
        let html = "<html><head><title>t</title></head><body></body></html>";

        let out = rewrite_index(html, &make_index("dist", false)).unwrap();

        assert!(out.contains("<link rel=\"modulepreload\" href=\"/counter.js\""));
        assert!(out.contains("as=\"fetch\" type=\"application/wasm\""));
        assert!(out.contains("import init from '/counter.js';"));
        assert!(out.contains("module_or_path: '/counter_bg.wasm'"));
        assert!(!out.contains("__wisp/version"));
    }

    #[test]
    fn reload_script_on_dev_builds() {
        let html = "<html><head></head><body></body></html>";

        let out = rewrite_index(html, &make_index("dist", true)).unwrap();

        assert!(out.contains("__wisp/version"));
    }

    #[test]
    fn missing_head_is_an_error() {
        let err = rewrite_index("<body></body>", &make_index("dist", false)).unwrap_err();

        assert!(err.to_string().contains("<head> tag not found"));
    }

    #[test]
    fn missing_body_is_an_error() {
        let err =
            rewrite_index("<html><head></head></html>", &make_index("dist", false)).unwrap_err();

        assert!(err.to_string().contains("<body> tag not found"));
    }
}
