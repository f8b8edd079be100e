pub mod segmentation;
