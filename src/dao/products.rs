use sqlx::PgConnection;
use tracing::{Instrument, instrument};

use crate::dao::handle_database_error;
use crate::model::{
    apperror::{ApplicationError, ErrorType},
    products::{Product, QueryProductDbResp},
};

/**
 * SQL query to add a new product.
 */
const INSERT_PRODUCT: &str = "INSERT INTO products (product_id, name, category, price, stock_quantity) VALUES ($1, $2, $3, $4, $5)";

/**
 * SQL query to retrieve a product by id.
 */
const GET_PRODUCT_BY_ID: &str = "SELECT product_id, name, category, price, stock_quantity FROM products WHERE product_id = $1";

/**
 * SQL query to retrieve all products.
 */
const GET_ALL_PRODUCTS: &str = "SELECT product_id, name, category, price, stock_quantity FROM products ORDER BY product_id";

/**
 * SQL query to update a product.
 */
const UPDATE_PRODUCT: &str = "UPDATE products SET name = $1, category = $2, price = $3, stock_quantity = $4 WHERE product_id = $5";

/**
 * SQL query to delete a product.
 */
const DELETE_PRODUCT_BY_ID: &str = "DELETE FROM products WHERE product_id = $1";

/**
 * DAO for product-related database operations.
 */
pub struct ProductDao {}

impl ProductDao {
    /**
     * Creates a new instance of `ProductDao`.
     *
     * # Returns
     * A new instance of `ProductDao`.
     */
    pub fn new() -> Self {
        ProductDao {}
    }

    /**
     * Adds a new product to the database.
     *
     * # Arguments
     * `transaction`: The database transaction to execute the query within.
     * `product`: The product to be added.
     *
     * # Returns
     * A Result containing the stored product or an `ApplicationError`.
     */
    #[instrument(skip(self, transaction), fields(result))]
    pub async fn add_product(&self, transaction: &mut PgConnection, product: Product) -> Result<Product, ApplicationError> {
        let span = tracing::Span::current();
        sqlx::query(INSERT_PRODUCT)
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.category)
            .bind(product.price)
            .bind(product.stock_quantity)
            .execute(transaction)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(err.as_database_error(), &format!("Product with the Id {} exists", product.id)))?;
        Ok(product)
    }

    /**
     * Retrieves a product by its id.
     *
     * # Arguments
     * `connection`: The database connection.
     * `product_id`: The id of the product.
     *
     * # Returns
     * A Result containing the product if it exists, or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_product_by_id(&self, connection: &mut PgConnection, product_id: i32) -> Result<Option<Product>, ApplicationError> {
        let span = tracing::Span::current();
        let result: Option<QueryProductDbResp> = sqlx::query_as(GET_PRODUCT_BY_ID)
            .bind(product_id)
            .fetch_optional(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get product: {err}")))?;
        Ok(result.map(Product::from))
    }

    /**
     * Retrieves all products ordered by id.
     *
     * # Arguments
     * `connection`: The database connection.
     *
     * # Returns
     * A Result containing the products or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_all_products(&self, connection: &mut PgConnection) -> Result<Vec<Product>, ApplicationError> {
        let span = tracing::Span::current();
        let results: Vec<QueryProductDbResp> = sqlx::query_as(GET_ALL_PRODUCTS)
            .fetch_all(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get product list: {err}")))?;
        Ok(results.into_iter().map(Product::from).collect())
    }

    /**
     * Updates an existing product.
     *
     * # Arguments
     * `transaction`: The database transaction to execute the query within.
     * `product`: The product with updated fields.
     *
     * # Returns
     * A Result containing the updated product or an `ApplicationError`.
     */
    #[instrument(skip(self, transaction), fields(result))]
    pub async fn update_product(&self, transaction: &mut PgConnection, product: Product) -> Result<Product, ApplicationError> {
        let span = tracing::Span::current();
        let result = sqlx::query(UPDATE_PRODUCT)
            .bind(&product.name)
            .bind(&product.category)
            .bind(product.price)
            .bind(product.stock_quantity)
            .bind(product.id)
            .execute(transaction)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(err.as_database_error(), &format!("Product with the Id {} exists", product.id)))?;
        if result.rows_affected() == 0 {
            tracing::debug!("Product with id {} not found for update", product.id);
            return Err(ApplicationError::new(ErrorType::NotFound, format!("Product with the Id {} doesn't exist", product.id)));
        }
        if result.rows_affected() > 1 {
            tracing::warn!("Multiple products attempted updated. Rolled back");
            return Err(ApplicationError::new(ErrorType::DatabaseError, "Multiple products attempted updated. Rolled back"));
        }
        Ok(product)
    }

    /**
     * Deletes a product by its id.
     *
     * # Arguments
     * `transaction`: The database transaction to execute the query within.
     * `product_id`: The id of the product to be deleted.
     *
     * # Returns
     * A Result containing the deleted id or an `ApplicationError`.
     */
    #[instrument(skip(self, transaction), fields(result))]
    pub async fn delete_product_by_id(&self, transaction: &mut PgConnection, product_id: i32) -> Result<i32, ApplicationError> {
        let span = tracing::Span::current();
        let result = sqlx::query(DELETE_PRODUCT_BY_ID)
            .bind(product_id)
            .execute(transaction)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to delete product: {err}")))?;
        if result.rows_affected() == 0 {
            tracing::debug!("Product with ID {} not found for deletion", product_id);
            return Err(ApplicationError::new(ErrorType::NotFound, format!("Product with the Id {product_id} doesn't exist")));
        }
        if result.rows_affected() > 1 {
            tracing::warn!("Multiple products attempted deleted. Rolled back");
            return Err(ApplicationError::new(ErrorType::DatabaseError, "Multiple products attempted deleted. Rolled back"));
        }
        Ok(product_id)
    }
}

#[cfg(feature = "integration-test")]
#[cfg(test)]
mod integration_test {
    use rust_decimal::Decimal;

    use super::*;
    use crate::dao::test_support::init_db;

    fn product(id: i32) -> Product {
        Product::new(id, "Kettle".to_string(), "Kitchen".to_string(), Decimal::new(149999, 2), 10)
    }

    #[sqlx::test]
    async fn test_add_then_get_product_round_trip() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let product_dao = ProductDao::new();
        product_dao.add_product(&mut transaction, product(900001)).await.unwrap();
        let fetched = product_dao.get_product_by_id(&mut transaction, 900001).await.unwrap();
        assert_eq!(fetched, Some(product(900001)));
        transaction.rollback().await.unwrap(); // Rollback the transaction to avoid leaving test data in the database
    }

    #[sqlx::test]
    async fn test_add_update_then_delete_product() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let product_dao = ProductDao::new();
        product_dao.add_product(&mut transaction, product(900002)).await.unwrap();
        let updated = Product { name: "Steel Kettle".to_string(), stock_quantity: 4, ..product(900002) };
        product_dao.update_product(&mut transaction, updated.clone()).await.unwrap();
        assert_eq!(product_dao.get_product_by_id(&mut transaction, 900002).await.unwrap(), Some(updated));
        let all = product_dao.get_all_products(&mut transaction).await.unwrap();
        assert!(all.iter().any(|p| p.id == 900002));
        assert_eq!(product_dao.delete_product_by_id(&mut transaction, 900002).await.unwrap(), 900002);
        assert!(product_dao.get_product_by_id(&mut transaction, 900002).await.unwrap().is_none());
        transaction.rollback().await.unwrap();
    }

    #[sqlx::test]
    async fn test_delete_unknown_product() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let error = ProductDao::new().delete_product_by_id(&mut transaction, 999999).await.unwrap_err();
        assert_eq!(error.error_type, ErrorType::NotFound);
        transaction.rollback().await.unwrap();
    }

    #[sqlx::test]
    async fn test_update_unknown_product() {
        let pool = init_db().await;
        let mut transaction = pool.begin().await.unwrap();
        let error = ProductDao::new().update_product(&mut transaction, product(999998)).await.unwrap_err();
        assert_eq!(error.message, "Product with the Id 999998 doesn't exist");
        transaction.rollback().await.unwrap();
    }
}
