mod dash;
mod discrete;
mod geometry;
mod measure;
mod path;
mod stroke;
