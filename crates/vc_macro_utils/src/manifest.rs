use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use proc_macro2::Span;
use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to find how generated code must name a
/// crate of this workspace.
///
/// A derive expands inside the crate that invokes it, so the path it emits
/// for `vc_serial` depends on that crate's dependencies.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_serial"));
/// ```
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `vc_` and the caller depends on
///    the facade `vc_persist`, return `::vc_persist::short_name`
///    (e.g. `vc_serial` -> `::vc_persist::serial`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. Otherwise, fall back to the absolute path `::crate_name`.
///
/// A manifest that cannot be found, read or parsed resolves every crate with
/// rule 4.
///
/// ## Note
///
/// A crate naming itself needs `extern crate self as vc_serial;` in its
/// root, so the absolute path also works inside the crate.
#[derive(Debug)]
pub struct Manifest {
    manifest: Option<Document<Box<str>>>,
    modified_time: Option<SystemTime>,
}

const FACADE_NAME: &str = "vc_persist";
const WORKSPACE_PREFIX: &str = "vc_";

impl Manifest {
    fn manifest_path() -> Option<PathBuf> {
        let mut path = PathBuf::from(env::var_os("CARGO_MANIFEST_DIR")?);
        path.push("Cargo.toml");
        path.exists().then_some(path)
    }

    fn modified_time(path: &Path) -> Option<SystemTime> {
        std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
    }

    fn read(path: &Path) -> Option<Document<Box<str>>> {
        let text = std::fs::read_to_string(path).ok()?.into_boxed_str();
        Document::parse(text).ok()
    }

    fn absolute(name: &str) -> syn::Path {
        let ident = syn::Ident::new(name, Span::call_site());
        let mut path = syn::Path::from(ident);
        path.leading_colon = Some(Default::default());
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(name));
        }
        let module = name.strip_prefix(WORKSPACE_PREFIX)?;
        if deps.contains_key(FACADE_NAME) {
            let mut path = Self::absolute(FACADE_NAME);
            path.segments
                .push(syn::Ident::new(module, Span::call_site()).into());
            return Some(path);
        }
        None
    }

    /// Returns the path of the crate `name` as seen from the caller.
    ///
    /// See the type level documentation for the resolution order.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        let Some(manifest) = &self.manifest else {
            return Self::absolute(name);
        };
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|table| match manifest.get(table) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| Self::absolute(name))
    }

    /// Runs `func` on the caller's manifest.
    ///
    /// Manifests are cached per path and re-read when the file changes.
    /// Reading is still not free, call this once per macro invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let Some(path) = Self::manifest_path() else {
            return func(&Manifest {
                manifest: None,
                modified_time: None,
            });
        };
        let modified_time = Self::modified_time(&path);

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(manifest) = manifests.get(&path)
            && modified_time.is_some()
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }
        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use quote::ToTokens;
    use toml_edit::Document;

    use super::Manifest;

    fn resolve(toml: &str, name: &str) -> String {
        let manifest = Manifest {
            manifest: Some(Document::parse(toml.into()).unwrap()),
            modified_time: None,
        };
        manifest.get_crate_path(name).to_token_stream().to_string()
    }

    #[test]
    fn direct_dependency() {
        let toml = "[dependencies]\nvc_serial = \"0.0.1\"\n";
        assert_eq!(resolve(toml, "vc_serial"), ":: vc_serial");
    }

    #[test]
    fn through_facade() {
        let toml = "[dev-dependencies]\nvc_persist = \"0.0.1\"\n";
        assert_eq!(resolve(toml, "vc_serial"), ":: vc_persist :: serial");
    }

    #[test]
    fn fallback() {
        assert_eq!(resolve("[package]\nname = \"x\"\n", "vc_serial"), ":: vc_serial");
        let empty = Manifest {
            manifest: None,
            modified_time: None,
        };
        let path = empty.get_crate_path("vc_serial");
        assert_eq!(path.to_token_stream().to_string(), ":: vc_serial");
    }
}
