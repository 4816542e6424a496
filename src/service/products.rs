use sqlx::{PgConnection, Pool, Postgres};
use tracing::{Instrument, instrument};

use crate::{
    dao::products::ProductDao,
    model::{
        apperror::{ApplicationError, ErrorType},
        products::Product,
    },
};

/**
 * Represents the service for managing the product catalog.
 */
pub struct ProductService {
    /**
     * The DAO for product operations.
     */
    product_dao: ProductDao,
    /**
     * Optional connection pool for database operations. Optional so the service can be built without a database.
     */
    connection_pool: Option<Pool<Postgres>>,
}

impl ProductService {
    /**
     * Creates a new instance of `ProductService`.
     *
     * # Arguments
     * `product_dao`: The DAO for product operations.
     * `connection_pool`: Optional connection pool for database operations.
     *
     * # Returns
     * A new instance of `ProductService`.
     */
    pub fn new(product_dao: ProductDao, connection_pool: Option<Pool<Postgres>>) -> Self {
        ProductService { product_dao, connection_pool }
    }

    fn connection_pool(&self) -> Result<&Pool<Postgres>, ApplicationError> {
        self.connection_pool.as_ref().ok_or_else(|| ApplicationError::new(ErrorType::DatabaseError, "No database connection available"))
    }

    /**
     * Adds a new product unless a product with the same id exists.
     *
     * # Arguments
     * `product`: The product to be added.
     *
     * # Returns
     * A Result containing the stored product or an `ApplicationError`.
     */
    #[instrument(skip(self), fields(result))]
    pub async fn add_product(&self, product: Product) -> Result<Product, ApplicationError> {
        let span = tracing::Span::current();
        let mut transaction = self.connection_pool()?.begin().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to begin transaction: {err}")))?;
        let result = async {
            if self.product_dao.get_product_by_id(&mut transaction, product.id).await?.is_some() {
                return Err(ApplicationError::new(ErrorType::ConstraintViolation, format!("Product with the Id {} exists", product.id)));
            }
            self.product_dao.add_product(&mut transaction, product).await
        }
        .instrument(span)
        .await;
        match result {
            Ok(product) => {
                transaction.commit().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to commit transaction: {err}")))?;
                Ok(product)
            }
            Err(err) => {
                transaction.rollback().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to rollback transaction: {err}")))?;
                Err(err)
            }
        }
    }

    /**
     * Retrieves a product by its id.
     *
     * # Arguments
     * `product_id`: The id of the product.
     *
     * # Returns
     * A Result containing the product or a not-found `ApplicationError`.
     */
    #[instrument(skip(self), fields(result))]
    pub async fn get_product_by_id(&self, product_id: i32) -> Result<Product, ApplicationError> {
        let mut connection = self.connection_pool()?.acquire().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to acquire connection: {err}")))?;
        Self::existing_product(&self.product_dao, &mut connection, product_id).await
    }

    /**
     * Retrieves all products.
     *
     * # Returns
     * A Result containing the products, or a not-found `ApplicationError` when the catalog is empty.
     */
    #[instrument(skip(self), fields(result))]
    pub async fn get_all_products(&self) -> Result<Vec<Product>, ApplicationError> {
        let mut connection = self.connection_pool()?.acquire().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to acquire connection: {err}")))?;
        let products = self.product_dao.get_all_products(&mut connection).await?;
        if products.is_empty() {
            return Err(ApplicationError::new(ErrorType::NotFound, "No products available in the database"));
        }
        Ok(products)
    }

    /**
     * Updates an existing product.
     *
     * # Arguments
     * `product`: The product with updated fields.
     *
     * # Returns
     * A Result containing the updated product or an `ApplicationError`.
     */
    #[instrument(skip(self), fields(result))]
    pub async fn update_product(&self, product: Product) -> Result<Product, ApplicationError> {
        let span = tracing::Span::current();
        let mut transaction = self.connection_pool()?.begin().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to begin transaction: {err}")))?;
        let result = async {
            Self::existing_product(&self.product_dao, &mut transaction, product.id).await?;
            self.product_dao.update_product(&mut transaction, product).await
        }
        .instrument(span)
        .await;
        match result {
            Ok(product) => {
                transaction.commit().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to commit transaction: {err}")))?;
                Ok(product)
            }
            Err(err) => {
                transaction.rollback().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to rollback transaction: {err}")))?;
                Err(err)
            }
        }
    }

    /**
     * Deletes a product by its id. Nothing is deleted when the product doesn't exist.
     *
     * # Arguments
     * `product_id`: The id of the product to be deleted.
     *
     * # Returns
     * A Result containing the deleted id or an `ApplicationError`.
     */
    #[instrument(skip(self), fields(result))]
    pub async fn delete_product_by_id(&self, product_id: i32) -> Result<i32, ApplicationError> {
        let span = tracing::Span::current();
        let mut transaction = self.connection_pool()?.begin().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to begin transaction: {err}")))?;
        let result = async {
            Self::existing_product(&self.product_dao, &mut transaction, product_id).await?;
            self.product_dao.delete_product_by_id(&mut transaction, product_id).await
        }
        .instrument(span)
        .await;
        match result {
            Ok(product_id) => {
                transaction.commit().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to commit transaction: {err}")))?;
                Ok(product_id)
            }
            Err(err) => {
                transaction.rollback().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to rollback transaction: {err}")))?;
                Err(err)
            }
        }
    }

    async fn existing_product(product_dao: &ProductDao, connection: &mut PgConnection, product_id: i32) -> Result<Product, ApplicationError> {
        product_dao
            .get_product_by_id(connection, product_id)
            .await?
            .ok_or_else(|| ApplicationError::new(ErrorType::NotFound, format!("Product with the Id {product_id} doesn't exist")))
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use super::*;

    #[tokio::test]
    async fn test_operations_without_database() {
        let service = ProductService::new(ProductDao::new(), None);
        let product = Product::new(1, "Kettle".to_string(), "Kitchen".to_string(), Decimal::new(1500, 2), 3);
        assert_eq!(service.add_product(product.clone()).await.unwrap_err().error_type, ErrorType::DatabaseError);
        assert_eq!(service.get_product_by_id(1).await.unwrap_err().message, "No database connection available");
        assert!(service.get_all_products().await.is_err());
        assert!(service.update_product(product).await.is_err());
        assert!(service.delete_product_by_id(1).await.is_err());
    }
}
