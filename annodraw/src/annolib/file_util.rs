use annodraw_domain::{DrawResult, drawerr};
use lazy_static::lazy_static;
use std::{
    fmt::Debug,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{error, info};

lazy_static! {
    pub static ref DEFAULT_TMPDIR: PathBuf = std::env::temp_dir().join("annodraw");
}
lazy_static! {
    pub static ref DEFAULT_HOMEDIR: PathBuf = match dirs::home_dir() {
        Some(p) => p.join(".annodraw"),
        _ => std::env::temp_dir().join("annodraw"),
    };
}

pub fn read_to_string<P>(p: P) -> DrawResult<String>
where
    P: AsRef<Path> + Debug,
{
    fs::read_to_string(&p).map_err(|e| drawerr!("could not read {:?} due to {:?}", p, e))
}

pub fn write<P, C>(path: P, contents: C) -> DrawResult<()>
where
    P: AsRef<Path> + Debug,
    C: AsRef<[u8]>,
{
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)
            .map_err(|e| drawerr!("could not create folder {:?} since {:?}", parent, e))?;
    }
    fs::write(&path, contents).map_err(|e| drawerr!("could not write to {:?} since {:?}", path, e))
}

pub struct Defer<F: FnMut()> {
    pub func: F,
}
impl<F: FnMut()> Drop for Defer<F> {
    fn drop(&mut self) {
        (self.func)();
    }
}
#[macro_export]
macro_rules! defer {
    ($f:expr) => {
        let _dfr = $crate::file_util::Defer { func: $f };
    };
}
pub fn checked_remove<'a, P: AsRef<Path> + Debug>(
    path: &'a P,
    func: fn(p: &'a P) -> io::Result<()>,
) {
    match func(path) {
        Ok(_) => info!("removed {path:?}"),
        Err(e) => error!("could not remove {path:?} due to {e:?}"),
    }
}
#[macro_export]
macro_rules! defer_folder_removal {
    ($path:expr) => {
        let func = || $crate::file_util::checked_remove($path, std::fs::remove_dir_all);
        $crate::defer!(func);
    };
}

/// Fresh folder below the temporary directory, e.g., for test outputs.
pub fn tmp_folder(name: &str) -> DrawResult<PathBuf> {
    let folder = DEFAULT_TMPDIR.join(name);
    fs::create_dir_all(&folder)
        .map_err(|e| drawerr!("could not create folder {:?} since {:?}", folder, e))?;
    Ok(folder)
}

#[test]
fn test_write_read() {
    let folder = tmp_folder("file_util_test_write_read").unwrap();
    defer_folder_removal!(&folder);
    let file = folder.join("sub").join("some.txt");
    write(&file, "content").unwrap();
    assert_eq!(read_to_string(&file).unwrap(), "content");
    assert!(read_to_string(folder.join("missing.txt")).is_err());
}
