pub mod mandelbrot_set;
pub mod rayon_rows;
