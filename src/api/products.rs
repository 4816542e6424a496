use tracing::{Instrument, instrument};

use crate::{
    api::response::Response,
    model::{
        apperror::{ApplicationError, ErrorType},
        products::Product,
    },
    service::products::ProductService,
};

/**
 * Controller for the product catalog application.
 */
pub struct ProductController {
    product_service: ProductService,
}

impl ProductController {
    pub fn new(product_service: ProductService) -> Self {
        ProductController { product_service }
    }

    /**
     * Adds a product to the catalog.
     *
     * # Arguments
     * `product`: The product to add.
     *
     * # Returns
     * A `Response` carrying the stored product.
     */
    #[instrument(skip(self, product), fields(service = "addProduct", product_id = product.id))]
    pub async fn add_product(&self, product: Product) -> Response<Product> {
        let span = tracing::Span::current();
        let product = match product.validate("Invalid Input Parameters") {
            Ok(product) => product,
            Err(err) => return Response::from(Err(err)),
        };
        Response::from(self.product_service.add_product(product).instrument(span).await)
    }

    #[instrument(skip(self), fields(service = "getProductById"))]
    pub async fn get_product_by_id(&self, product_id: i32) -> Response<Product> {
        let span = tracing::Span::current();
        if let Err(err) = Self::check_product_id(product_id) {
            return Response::from(Err(err));
        }
        Response::from(self.product_service.get_product_by_id(product_id).instrument(span).await)
    }

    #[instrument(skip(self), fields(service = "getAllProducts"))]
    pub async fn get_all_products(&self) -> Response<Vec<Product>> {
        let span = tracing::Span::current();
        Response::from(self.product_service.get_all_products().instrument(span).await)
    }

    /**
     * Updates an existing product.
     *
     * # Arguments
     * `product`: The product with its new field values.
     *
     * # Returns
     * A `Response` carrying the updated product.
     */
    #[instrument(skip(self, product), fields(service = "updateProduct", product_id = product.id))]
    pub async fn update_product(&self, product: Product) -> Response<Product> {
        let span = tracing::Span::current();
        let product = match product.validate("Invalid Parameters for Updation") {
            Ok(product) => product,
            Err(err) => return Response::from(Err(err)),
        };
        Response::from(self.product_service.update_product(product).instrument(span).await)
    }

    /**
     * Deletes a product.
     *
     * # Returns
     * A `Response` carrying the id of the deleted product.
     */
    #[instrument(skip(self), fields(service = "deleteProduct"))]
    pub async fn delete_product_by_id(&self, product_id: i32) -> Response<i32> {
        let span = tracing::Span::current();
        if let Err(err) = Self::check_product_id(product_id) {
            return Response::from(Err(err));
        }
        Response::from(self.product_service.delete_product_by_id(product_id).instrument(span).await)
    }

    fn check_product_id(product_id: i32) -> Result<(), ApplicationError> {
        if product_id < 0 {
            return Err(ApplicationError::new(ErrorType::Validation, "Product Id cannot be less than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use rust_decimal::Decimal;

    use super::*;
    use crate::{api::response::ERROR_CODE, dao::products::ProductDao};

    fn controller() -> ProductController {
        ProductController::new(ProductService::new(ProductDao::new(), None))
    }

    fn product(id: i32, price: Decimal, stock_quantity: i32) -> Product {
        Product::new(id, "Kettle".to_string(), "Kitchen".to_string(), price, stock_quantity)
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_product() {
        for invalid in [product(0, Decimal::new(100, 2), 1), product(1, Decimal::ZERO, 1), product(1, Decimal::new(1005, 3), 1), product(1, Decimal::new(100, 2), 0)] {
            let response = controller().add_product(invalid).await;
            assert_eq!(response.status_code, ERROR_CODE);
            assert_eq!(response.error_message.unwrap(), "Invalid Input Parameters");
        }
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name() {
        let response = controller().update_product(Product::new(1, " ".to_string(), "Kitchen".to_string(), Decimal::new(100, 2), 1)).await;
        assert_eq!(response.error_message.unwrap(), "Invalid Parameters for Updation");
    }

    #[tokio::test]
    async fn test_negative_ids_rejected() {
        assert_eq!(controller().get_product_by_id(-1).await.error_message.unwrap(), "Product Id cannot be less than 0");
        assert_eq!(controller().delete_product_by_id(-5).await.error_message.unwrap(), "Product Id cannot be less than 0");
    }

    #[tokio::test]
    async fn test_valid_product_reaches_service() {
        let response = controller().add_product(product(1, Decimal::new(1999, 2), 2)).await;
        assert_eq!(response.error_message.unwrap(), "No database connection available");
    }
}
