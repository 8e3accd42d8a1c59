//! State-owning storefront facade.
//!
//! [`Shop`] owns all storefront state explicitly (no module-level globals),
//! so multiple independent shops can run over separate stores. Durable state
//! (catalog, sales ledger, theme) is read from the store once at open and
//! written through on every mutation; the cart lives in memory only.
//!
//! Every operation is synchronous and runs to completion before the next is
//! dispatched, so checkout needs no locks or transactions: mutations are
//! staged, persisted, and only then committed, which means a failure at any
//! step leaves every entity in its pre-call state.

use crate::cart::{Cart, CartLine, CartTotals};
use crate::catalog::{Catalog, Product};
use crate::checkout::{Sale, SaleLineItem, SalesLedger};
use crate::error::ShopError;
use crate::ids::ProductId;
use crate::money::Currency;
use crate::owner::{self, OwnerSummary};
use crate::theme::Theme;
use bodega_kv::Store;
use tracing::{debug, info, warn};

/// Blob keys in the backing store.
const CATALOG_KEY: &str = "catalog";
const SALES_KEY: &str = "sales";
const THEME_KEY: &str = "theme";

/// Customer name recorded when none is given at checkout.
const GUEST_CUSTOMER: &str = "Guest Customer";

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Currency products are priced in.
    pub currency: Currency,
    /// Password gating the owner panel. Leave empty to disable owner login.
    pub owner_password: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            currency: Currency::Bdt,
            owner_password: String::new(),
        }
    }
}

/// A single-store point-of-sale storefront.
pub struct Shop {
    store: Store,
    config: ShopConfig,
    catalog: Catalog,
    cart: Cart,
    sales: SalesLedger,
    theme: Theme,
}

impl Shop {
    /// Open a shop over a store with the default configuration.
    pub fn open(store: Store) -> Result<Self, ShopError> {
        Self::open_with_config(store, ShopConfig::default())
    }

    /// Open a shop over a store.
    ///
    /// Reads the catalog, sales ledger, and theme blobs once; a missing blob
    /// means "use defaults" (built-in starter catalog, empty ledger, light
    /// theme). A freshly seeded starter catalog is persisted immediately.
    pub fn open_with_config(store: Store, config: ShopConfig) -> Result<Self, ShopError> {
        let catalog = match store.get::<Vec<Product>>(CATALOG_KEY)? {
            Some(products) => Catalog::from_products(products),
            None => {
                let catalog = Catalog::starter(config.currency);
                store.set(CATALOG_KEY, &catalog.products())?;
                info!(products = catalog.len(), "seeded starter catalog");
                catalog
            }
        };
        let sales = store
            .get::<Vec<Sale>>(SALES_KEY)?
            .map(SalesLedger::from_sales)
            .unwrap_or_default();
        let theme = store.get::<Theme>(THEME_KEY)?.unwrap_or_default();
        debug!(
            products = catalog.len(),
            sales = sales.len(),
            theme = theme.as_str(),
            "shop state loaded"
        );
        Ok(Self {
            store,
            config,
            catalog,
            cart: Cart::new(),
            sales,
            theme,
        })
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    /// Add a new product or update the one matching `name` ignoring case.
    ///
    /// Persists the catalog and returns the affected product.
    pub fn upsert_product(
        &mut self,
        name: &str,
        price: f64,
        qty: i64,
    ) -> Result<Product, ShopError> {
        let mut staged = self.catalog.clone();
        let product = staged
            .upsert(name, price, qty, self.config.currency)?
            .clone();
        self.persist_catalog(&staged)?;
        self.catalog = staged;
        info!(id = %product.id, name = %product.name, qty = product.qty, "product upserted");
        Ok(product)
    }

    /// Delete the product matching `name` ignoring case.
    ///
    /// Persists the catalog and returns the removed product. Cart lines
    /// referencing it keep their snapshots (see [`Shop::checkout`]).
    pub fn delete_product(&mut self, name: &str) -> Result<Product, ShopError> {
        let mut staged = self.catalog.clone();
        let removed = staged.delete(name)?;
        self.persist_catalog(&staged)?;
        self.catalog = staged;
        info!(id = %removed.id, name = %removed.name, "product deleted");
        Ok(removed)
    }

    /// Look up a product by id.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.find(id)
    }

    /// Look up a product by name, ignoring case.
    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.catalog.find_by_name(name)
    }

    /// Ordered snapshot of the catalog for rendering.
    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    // ------------------------------------------------------------------
    // Cart
    // ------------------------------------------------------------------

    /// Add a product to the cart, merging with an existing line.
    ///
    /// Fails with `NotFound` if the id doesn't resolve, `InvalidQuantity` if
    /// the request is non-positive or exceeds current stock, and
    /// `InsufficientStock` (with the exact remaining allowance) if merging
    /// would push the line past the stock level.
    pub fn add_to_cart(
        &mut self,
        product_id: ProductId,
        requested: i64,
    ) -> Result<CartLine, ShopError> {
        let product = self
            .catalog
            .find(product_id)
            .ok_or_else(|| ShopError::NotFound(format!("product id {product_id}")))?;
        let line = self.cart.add_line(product, requested)?.clone();
        debug!(product = %line.name, order_qty = line.order_qty, "cart line updated");
        Ok(line)
    }

    /// Remove the entire line for a product; no-op if absent.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        self.cart.remove_line(product_id)
    }

    /// Empty the cart unconditionally.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Cart totals over the snapshot prices.
    pub fn cart_totals(&self) -> Result<CartTotals, ShopError> {
        self.cart.totals(self.config.currency)
    }

    /// Ordered snapshot of the cart lines.
    pub fn cart_lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    // ------------------------------------------------------------------
    // Checkout
    // ------------------------------------------------------------------

    /// Finalize the cart into an immutable sale.
    ///
    /// Decrements stock for every line whose product still resolves, appends
    /// the sale to the ledger, persists both, clears the cart, and returns
    /// the sale for invoice rendering. Lines whose product was deleted
    /// mid-session still contribute their snapshot price to the total but
    /// trigger no stock decrement.
    ///
    /// Atomic from the caller's point of view: stock updates are staged on a
    /// copy and nothing is committed until both blobs persist, so a failure
    /// leaves catalog, ledger, and cart exactly as they were.
    pub fn checkout(
        &mut self,
        customer_name: &str,
        customer_phone: &str,
    ) -> Result<Sale, ShopError> {
        if self.cart.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        let mut staged_catalog = self.catalog.clone();
        for line in self.cart.lines() {
            match staged_catalog.decrement_stock(line.product_id, line.order_qty) {
                Ok(()) => {}
                Err(ShopError::NotFound(_)) => {
                    // Product deleted while in the cart: sell from the
                    // snapshot, nothing left to decrement.
                    warn!(
                        product = %line.name,
                        order_qty = line.order_qty,
                        "cart line no longer resolves to a catalog product"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        let totals = self.cart.totals(self.config.currency)?;
        let line_items = self
            .cart
            .lines()
            .iter()
            .map(|line| SaleLineItem {
                name: line.name.clone(),
                qty: line.order_qty,
                price: line.price,
            })
            .collect();

        let customer_name = customer_name.trim();
        let customer_name = if customer_name.is_empty() {
            GUEST_CUSTOMER
        } else {
            customer_name
        };
        let customer_phone = customer_phone.trim();
        let customer_phone = (!customer_phone.is_empty()).then(|| customer_phone.to_string());

        let invoice_id = self.sales.draw_invoice_id(&mut rand::thread_rng());
        let sale = Sale::new(
            invoice_id,
            customer_name,
            customer_phone,
            totals.grand_total,
            line_items,
        );

        let mut staged_sales = self.sales.clone();
        staged_sales.push(sale.clone());

        self.persist_catalog(&staged_catalog)?;
        self.store.set(SALES_KEY, &staged_sales.sales())?;
        self.catalog = staged_catalog;
        self.sales = staged_sales;
        self.cart.clear();

        info!(
            invoice = %sale.invoice_id,
            total = %sale.total_amount,
            sales_recorded = self.sales.len(),
            "checkout complete"
        );
        Ok(sale)
    }

    /// Read-only view of the sales ledger.
    pub fn sales(&self) -> &[Sale] {
        self.sales.sales()
    }

    // ------------------------------------------------------------------
    // Theme
    // ------------------------------------------------------------------

    /// Current theme preference.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Set and persist the theme preference.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), ShopError> {
        self.store.set(THEME_KEY, &theme)?;
        self.theme = theme;
        debug!(theme = theme.as_str(), "theme preference saved");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Owner
    // ------------------------------------------------------------------

    /// Check the owner password and return a ledger summary on success.
    ///
    /// Login is disabled while no owner password is configured.
    pub fn owner_login(&self, password: &str) -> Result<OwnerSummary, ShopError> {
        if self.config.owner_password.is_empty()
            || !owner::verify_password(password, &self.config.owner_password)
        {
            return Err(ShopError::InvalidCredentials);
        }
        let total_revenue = self.sales.total_revenue(self.config.currency)?;
        info!(sales_count = self.sales.len(), "owner login");
        Ok(OwnerSummary {
            sales_count: self.sales.len(),
            total_revenue,
        })
    }

    /// Currency this shop prices in.
    pub fn currency(&self) -> Currency {
        self.config.currency
    }

    fn persist_catalog(&self, catalog: &Catalog) -> Result<(), ShopError> {
        self.store.set(CATALOG_KEY, &catalog.products())?;
        debug!(products = catalog.len(), "catalog persisted");
        Ok(())
    }
}
