use server_api::ApiContext;

use crate::modals::ModalRegistry;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: ApiContext,
    pub(crate) modals: ModalRegistry,
}

impl AppState {
    pub(crate) fn new(api: ApiContext) -> Self {
        Self {
            api,
            modals: ModalRegistry::default(),
        }
    }
}
