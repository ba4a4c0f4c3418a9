//! Shared helpers for the CLI commands.

use crate::arch::ArchName;
use crate::memory::Image;
use crate::project::Project;
use std::io;

pub fn load_image(project: &Project) -> io::Result<Image> {
    let path = project.image().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "No image specified; pass --image or set one in the project file",
        )
    })?;

    Image::from_file(path, project.origin())
}

pub fn require_arch(project: &Project) -> io::Result<ArchName> {
    project.arch().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "No architecture specified; pass --arch or set one in the project file",
        )
    })
}
