pub mod expense_xlsx;
pub mod sales_xlsx;
pub mod settlement_csv;
pub mod workbook;
