//! Literal fixture tables
//!
//! Every table has a fixed header and three fixed data rows. Builders return a
//! fresh value on each call; nothing here is cached or mutated afterwards.

use crate::error::Result;
use crate::types::{CellValue, Sheet, Workbook};

/// Sheet name used for the employee table by the fallback-chain generator
pub const FALLBACK_EMPLOYEE_SHEET: &str = "Sheet1";
/// Sheet name used for the employee table by the dataframe generator
pub const EMPLOYEE_SHEET: &str = "Employees";
pub const PRODUCT_SHEET: &str = "Products";
pub const SALES_SHEET: &str = "Sales";

pub const EMPLOYEE_HEADERS: [&str; 4] = ["Name", "Age", "City", "Salary"];
pub const PRODUCT_HEADERS: [&str; 3] = ["Product", "Price", "Stock"];
pub const SALES_HEADERS: [&str; 3] = ["Date", "Sales", "Profit"];

/// Employee records under the given sheet name
pub fn employees(sheet_name: &str) -> Result<Sheet> {
    Sheet::new(sheet_name, EMPLOYEE_HEADERS)?
        .with_row(employee("John Doe", 25, "New York", 50_000))?
        .with_row(employee("Jane Smith", 30, "Los Angeles", 60_000))?
        .with_row(employee("Bob Johnson", 35, "Chicago", 70_000))
}

/// Product records
pub fn products() -> Result<Sheet> {
    Sheet::new(PRODUCT_SHEET, PRODUCT_HEADERS)?
        .with_row(product("Laptop", 999.99, 10))?
        .with_row(product("Mouse", 25.50, 50))?
        .with_row(product("Keyboard", 75.00, 25))
}

/// Daily sales records. Dates are stored as text.
pub fn sales() -> Result<Sheet> {
    Sheet::new(SALES_SHEET, SALES_HEADERS)?
        .with_row(sale("2024-01-01", 1000, 200))?
        .with_row(sale("2024-01-02", 1200, 300))?
        .with_row(sale("2024-01-03", 800, 150))
}

/// "Sheet1" + "Products", as written by the fallback chain
pub fn fallback_workbook() -> Result<Workbook> {
    let mut workbook = Workbook::new();
    workbook.add_sheet(employees(FALLBACK_EMPLOYEE_SHEET)?)?;
    workbook.add_sheet(products()?)?;
    Ok(workbook)
}

/// "Employees" + "Products" + "Sales", as written by the dataframe export
pub fn dataframe_workbook() -> Result<Workbook> {
    let mut workbook = Workbook::new();
    workbook.add_sheet(employees(EMPLOYEE_SHEET)?)?;
    workbook.add_sheet(products()?)?;
    workbook.add_sheet(sales()?)?;
    Ok(workbook)
}

fn employee(name: &str, age: i64, city: &str, salary: i64) -> [CellValue; 4] {
    [name.into(), age.into(), city.into(), salary.into()]
}

fn product(name: &str, price: f64, stock: i64) -> [CellValue; 3] {
    [name.into(), price.into(), stock.into()]
}

fn sale(date: &str, sales: i64, profit: i64) -> [CellValue; 3] {
    [date.into(), sales.into(), profit.into()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_layout() {
        let wb = fallback_workbook().unwrap();
        assert_eq!(wb.sheet_names(), vec!["Sheet1", "Products"]);

        let employees = wb.sheet("Sheet1").unwrap();
        assert_eq!(employees.headers(), EMPLOYEE_HEADERS);
        assert_eq!(employees.rows().len(), 3);
        assert_eq!(employees.rows()[1][0], CellValue::from("Jane Smith"));
        assert_eq!(employees.rows()[2][3], CellValue::Int(70_000));
    }

    #[test]
    fn test_dataframe_layout() {
        let wb = dataframe_workbook().unwrap();
        assert_eq!(wb.sheet_names(), vec!["Employees", "Products", "Sales"]);

        for sheet in wb.sheets() {
            assert_eq!(sheet.rows().len(), 3, "sheet {}", sheet.name());
        }

        let sales = wb.sheet("Sales").unwrap();
        assert_eq!(sales.rows()[0][0], CellValue::from("2024-01-01"));
        assert_eq!(sales.rows()[2][2], CellValue::Int(150));
    }

    #[test]
    fn test_prices_are_floats() {
        let products = products().unwrap();
        let prices: Vec<_> = products.rows().iter().map(|r| r[1].clone()).collect();
        assert_eq!(
            prices,
            vec![
                CellValue::Float(999.99),
                CellValue::Float(25.5),
                CellValue::Float(75.0)
            ]
        );
    }
}
