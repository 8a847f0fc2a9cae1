use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's parsed `Cargo.toml`, used to find how a workspace crate
/// is reachable from the crate invoking a derive.
///
/// # Example
///
/// ```rust
/// # use f_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("f_reflect"));
/// ```
///
/// # Resolution rules
///
/// 1. The crate is a direct dependency: `::crate_name`.
/// 2. The name starts with `f_` and the caller depends on `f_core`:
///    `::f_core::short_name` (e.g. `f_reflect` -> `::f_core::reflect`).
/// 3. Same, through an `f` alias: `::f::short_name`.
/// 4. Steps 1-3 again for `dev-dependencies`.
/// 5. Otherwise `::crate_name`.
///
/// Inside a crate that names itself, `extern crate self as crate_name;` at the
/// crate root makes the fallback path valid.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const CORE_NAME: &str = "f_core";
const SHORT_NAME: &str = "f";
const PREFIX: &str = "f_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(path: &Path) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn prefixed(root: &str, module: &str) -> syn::Path {
        let mut path: syn::Path = syn::parse_str(&format!("::{root}")).unwrap();
        path.segments.push(syn::parse_str(module).unwrap());
        path
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(syn::parse_str(&format!("::{name}")).unwrap());
        }
        let module = name.strip_prefix(PREFIX)?;
        [CORE_NAME, SHORT_NAME]
            .into_iter()
            .find(|root| deps.contains_key(root))
            .map(|root| Self::prefixed(root, module))
    }

    /// Return a [`syn::Path`] for the package named `name` as seen from the
    /// caller's Cargo.toml. See the type-level docs for the rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(path) = Self::find_in_deps(deps, name)
            {
                return path;
            }
        }

        syn::parse_str(&format!("::{name}")).unwrap()
    }

    /// Run `func` against the caller's manifest.
    ///
    /// Manifests are cached per path and re-read only when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use toml_edit::Document;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(Box::<str>::from(text)).unwrap(),
            modified_time: std::time::SystemTime::UNIX_EPOCH,
        }
    }

    fn path_string(path: &syn::Path) -> String {
        let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
        let prefix = if path.leading_colon.is_some() { "::" } else { "" };
        format!("{prefix}{}", segments.join("::"))
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\nf_reflect = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("f_reflect")), "::f_reflect");
    }

    #[test]
    fn through_core_crate() {
        let m = manifest("[dependencies]\nf_core = \"0.0.1\"\n");
        assert_eq!(path_string(&m.get_crate_path("f_reflect")), "::f_core::reflect");
    }

    #[test]
    fn dev_dependency_alias() {
        let m = manifest("[dev-dependencies]\nf = { package = \"f_core\", version = \"0.0.1\" }\n");
        assert_eq!(path_string(&m.get_crate_path("f_reflect")), "::f::reflect");
    }

    #[test]
    fn fallback() {
        let m = manifest("[package]\nname = \"f_reflect\"\n");
        assert_eq!(path_string(&m.get_crate_path("f_reflect")), "::f_reflect");
    }
}
