//! Downloadable exports of the segmented product table.
//!
//! Both formats carry the same columns in the same order; the CSV
//! round-trips through `from_csv_bytes` for verification.

use rust_xlsxwriter::Workbook;

use crate::error::{PipelineError, PipelineResult};
use crate::types::SegmentedProduct;

/// Download file names offered by the dashboard.
pub const CSV_EXPORT_FILENAME: &str = "hasil_analisis_penjualan.csv";
pub const XLSX_EXPORT_FILENAME: &str = "hasil_analisis_penjualan.xlsx";

/// Export column headers, matching the serde renames on
/// `SegmentedProduct`.
pub const EXPORT_COLUMNS: [&str; 10] = [
    "Item Name",
    "Total_Quantity",
    "Total_Revenue",
    "Sales_Frequency",
    "Avg_Revenue_Per_Transaction",
    "Total_Revenue_Log",
    "Total_Quantity_Log",
    "Avg_Revenue_Log",
    "Cluster",
    "Label",
];

/// Serialize the product table to CSV bytes (UTF-8, header row first).
pub fn to_csv_bytes(products: &[SegmentedProduct]) -> PipelineResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for product in products {
        writer.serialize(product)?;
    }
    writer
        .into_inner()
        .map_err(|e| PipelineError::Csv(e.into_error().into()))
}

/// Parse CSV bytes produced by `to_csv_bytes` back into product rows.
pub fn from_csv_bytes(bytes: &[u8]) -> PipelineResult<Vec<SegmentedProduct>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut products = Vec::new();
    for result in reader.deserialize() {
        let product: SegmentedProduct = result?;
        products.push(product);
    }
    Ok(products)
}

/// Build an XLSX workbook with the product table on a single sheet.
pub fn to_xlsx_bytes(products: &[SegmentedProduct]) -> PipelineResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, product) in products.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, product.item_name.as_str())?;
        worksheet.write_number(row, 1, product.total_quantity)?;
        worksheet.write_number(row, 2, product.total_revenue)?;
        worksheet.write_number(row, 3, product.sales_frequency as f64)?;
        worksheet.write_number(row, 4, product.avg_revenue_per_transaction)?;
        worksheet.write_number(row, 5, product.total_revenue_log)?;
        worksheet.write_number(row, 6, product.total_quantity_log)?;
        worksheet.write_number(row, 7, product.avg_revenue_log)?;
        worksheet.write_number(row, 8, product.cluster as f64)?;
        worksheet.write_string(row, 9, product.label.to_string().as_str())?;
    }

    Ok(workbook.save_to_buffer()?)
}
