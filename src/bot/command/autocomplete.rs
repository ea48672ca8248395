use serenity::async_trait;

use crate::{
    bot::dispatch::AutocompleteHandler,
    error::AppError,
    model::interaction::{AutocompleteRequest, Suggestion},
    service::wishlist::WishlistService,
    state::AppState,
};

/// Suggests cosmetics from the whole catalog.
pub struct CatalogAutocomplete;

#[async_trait]
impl AutocompleteHandler for CatalogAutocomplete {
    async fn suggest(
        &self,
        state: &AppState,
        request: &AutocompleteRequest,
    ) -> Result<Vec<Suggestion>, AppError> {
        Ok(WishlistService::new(&state.users, &state.catalog).suggest_catalog(&request.value))
    }
}

/// Suggests cosmetics from the invoking user's own wishlist.
pub struct WishlistAutocomplete;

#[async_trait]
impl AutocompleteHandler for WishlistAutocomplete {
    async fn suggest(
        &self,
        state: &AppState,
        request: &AutocompleteRequest,
    ) -> Result<Vec<Suggestion>, AppError> {
        Ok(WishlistService::new(&state.users, &state.catalog)
            .suggest_wishlist(request.user_id, &request.value))
    }
}
