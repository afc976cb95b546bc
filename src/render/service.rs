//! Render coordination: the product controller.
//!
//! Every handler here takes an event plus the [`ViewModel`] and returns the [`Effects`] it
//! produced. Nothing in this module touches the network or the terminal; the event loop in
//! [`crate::app`] forwards the emitted [`ApiCommand`]s to the API worker and feeds the worker's
//! [`ApiResponse`]s back into [`ProductController::handle_response`].

use crate::catalog::{validate_create, validate_update, ApiError, Product, ProductId};
use crate::input::{InputAction, ScrollDirection};
use crate::render::protocol::{ApiCommand, ApiResponse, RequestId, WriteKind};
use crate::render::ui::messages;
use crate::render::ui::state::{Focus, FormField, LookupPanel, Modal, UiMode, ViewModel};
use log::debug;

/// What a handler asks the outside world to do.
#[derive(Debug, Default, PartialEq)]
pub struct Effects {
    pub commands: Vec<ApiCommand>,
    pub quit: bool,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    fn command(command: ApiCommand) -> Self {
        Self {
            commands: vec![command],
            quit: false,
        }
    }

    fn quit() -> Self {
        Self {
            commands: Vec::new(),
            quit: true,
        }
    }
}

/// Tracks request bookkeeping that must persist across input actions and worker responses.
#[derive(Debug, Default)]
pub struct ProductController {
    next_request_id: RequestId,
    latest_list_request: Option<RequestId>,
    latest_lookup_request: Option<RequestId>,
}

impl ProductController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Startup: fetch the list once and put the lookup panel in its placeholder state.
    pub fn initial_load(&mut self, vm: &mut ViewModel) -> Effects {
        vm.lookup = LookupPanel::Placeholder;
        Effects::command(self.fetch_list())
    }

    /// Explicit refresh of the product list.
    pub fn refresh(&mut self) -> Effects {
        Effects::command(self.fetch_list())
    }

    /// Row action: load the product into the update form and switch to update mode.
    pub fn begin_update(&mut self, vm: &mut ViewModel, index: usize) -> Effects {
        let Some(product) = vm.list.products.get(index).cloned() else {
            return Effects::none();
        };
        debug!("entering update mode for product {}", product.id);
        vm.update_form.fill_from(&product);
        vm.mode = UiMode::Update;
        vm.lookup = LookupPanel::Blank;
        self.latest_lookup_request = None;
        vm.focus = Focus::Form(FormField::Name);
        Effects::none()
    }

    /// Row action: ask for confirmation before deleting.
    pub fn request_delete(&mut self, vm: &mut ViewModel, index: usize) -> Effects {
        if let Some(product) = vm.list.products.get(index) {
            vm.modal = Some(Modal::ConfirmDelete {
                id: product.id.clone(),
                name: product.name.clone(),
            });
        }
        Effects::none()
    }

    /// Confirmation accepted: issue the delete.
    pub fn confirm_delete(&mut self, vm: &mut ViewModel) -> Effects {
        match vm.modal.take() {
            Some(Modal::ConfirmDelete { id, .. }) => {
                let request_id = self.allocate_request_id();
                Effects::command(ApiCommand::Delete { request_id, id })
            }
            other => {
                vm.modal = other;
                Effects::none()
            }
        }
    }

    /// Add-form submission.
    pub fn submit_add(&mut self, vm: &mut ViewModel) -> Effects {
        let form = &vm.add_form;
        match validate_create(&form.name, &form.description, &form.price) {
            Ok(draft) => {
                let request_id = self.allocate_request_id();
                Effects::command(ApiCommand::Create { request_id, draft })
            }
            Err(err) => {
                vm.alert(err.to_string());
                Effects::none()
            }
        }
    }

    /// Update-form submission.
    pub fn submit_update(&mut self, vm: &mut ViewModel) -> Effects {
        let form = &vm.update_form;
        match validate_update(form.id.as_ref(), &form.name, &form.description, &form.price) {
            Ok((id, draft)) => {
                let request_id = self.allocate_request_id();
                Effects::command(ApiCommand::Update {
                    request_id,
                    id,
                    draft,
                })
            }
            Err(err) => {
                vm.alert(err.to_string());
                Effects::none()
            }
        }
    }

    /// Leave update mode without saving.
    pub fn cancel_update(&mut self, vm: &mut ViewModel) -> Effects {
        debug!("update cancelled");
        vm.return_to_add_mode();
        self.reset_lookup_panel(vm);
        Effects::none()
    }

    /// Search submission: look a product up by identifier.
    pub fn submit_lookup(&mut self, vm: &mut ViewModel) -> Effects {
        let raw = vm.search_input.trim();
        if raw.is_empty() {
            vm.alert(messages::LOOKUP_EMPTY_ID);
            self.reset_lookup_panel(vm);
            return Effects::none();
        }
        let id = ProductId::new(raw);

        // Lookup and update are exclusive; the update form keeps its contents.
        vm.mode = UiMode::Add;
        vm.lookup = LookupPanel::Searching;

        let request_id = self.allocate_request_id();
        self.latest_lookup_request = Some(request_id);
        Effects::command(ApiCommand::Lookup { request_id, id })
    }

    /// Dispatch a user action according to the current modal and focus.
    pub fn process_action(&mut self, action: InputAction, vm: &mut ViewModel) -> Effects {
        match action {
            InputAction::Quit => return Effects::quit(),
            InputAction::Resize { width, height } => {
                vm.update_terminal_size(width, height);
                return Effects::none();
            }
            InputAction::NoAction => return Effects::none(),
            _ => {}
        }

        if vm.modal.is_some() {
            return self.process_modal_action(action, vm);
        }

        match vm.focus {
            Focus::List => self.process_list_action(action, vm),
            Focus::Form(field) => self.process_form_action(action, field, vm),
            Focus::Search => self.process_search_action(action, vm),
        }
    }

    /// Apply a worker response to the view.
    pub fn handle_response(&mut self, response: ApiResponse, vm: &mut ViewModel) -> Effects {
        match response {
            ApiResponse::ListLoaded { request_id, result } => {
                if Some(request_id) != self.latest_list_request {
                    debug!("dropping stale list response {request_id}");
                    return Effects::none();
                }
                self.latest_list_request = None;
                match result {
                    Ok(products) => {
                        vm.status_line
                            .set_message(format!("{} produto(s)", products.len()));
                        vm.list.replace(products);
                    }
                    Err(ApiError::Status { .. }) => {
                        vm.status_line.clear_message();
                        vm.list.show_error(messages::LIST_LOAD_FAILED);
                    }
                    Err(_) => {
                        vm.status_line.clear_message();
                        vm.list.show_error(messages::LIST_LOAD_ERROR);
                    }
                }
                Effects::none()
            }
            ApiResponse::LookupCompleted {
                request_id,
                id,
                result,
            } => {
                if Some(request_id) != self.latest_lookup_request {
                    debug!("dropping stale lookup response {request_id}");
                    return Effects::none();
                }
                self.latest_lookup_request = None;
                vm.lookup = lookup_panel_for(id, result);
                Effects::none()
            }
            ApiResponse::WriteCompleted { kind, result, .. } => match result {
                Ok(()) => self.write_succeeded(kind, vm),
                Err(err) => {
                    vm.alert(write_failure_message(kind, &err));
                    Effects::none()
                }
            },
        }
    }

    fn write_succeeded(&mut self, kind: WriteKind, vm: &mut ViewModel) -> Effects {
        match kind {
            WriteKind::Create => {
                vm.add_form.reset();
                vm.focus = Focus::Form(FormField::Name);
            }
            WriteKind::Update => {
                debug!("update saved, back to add mode");
                vm.return_to_add_mode();
                self.reset_lookup_panel(vm);
            }
            WriteKind::Delete => {}
        }
        Effects::command(self.fetch_list())
    }

    fn process_modal_action(&mut self, action: InputAction, vm: &mut ViewModel) -> Effects {
        let confirming = matches!(vm.modal, Some(Modal::ConfirmDelete { .. }));
        match (confirming, action) {
            (false, InputAction::Submit | InputAction::Cancel) => {
                vm.modal = None;
                Effects::none()
            }
            (true, InputAction::Submit | InputAction::Insert('y' | 'Y')) => self.confirm_delete(vm),
            (true, InputAction::Cancel | InputAction::Insert('n' | 'N')) => {
                vm.modal = None;
                Effects::none()
            }
            _ => Effects::none(),
        }
    }

    fn process_list_action(&mut self, action: InputAction, vm: &mut ViewModel) -> Effects {
        match action {
            InputAction::Scroll { direction, rows } => {
                let delta = match direction {
                    ScrollDirection::Up => -(rows as i64),
                    ScrollDirection::Down => rows as i64,
                };
                vm.list.move_selection(delta);
            }
            InputAction::Insert('k') => vm.list.move_selection(-1),
            InputAction::Insert('j') => vm.list.move_selection(1),
            InputAction::PageUp => vm.list.move_selection(-(vm.list_page_rows() as i64)),
            InputAction::PageDown => vm.list.move_selection(vm.list_page_rows() as i64),
            InputAction::GoToStart | InputAction::Insert('g') => vm.list.select_first(),
            InputAction::GoToEnd | InputAction::Insert('G') => vm.list.select_last(),
            InputAction::Submit | InputAction::Insert('u') => {
                let index = vm.list.selected;
                return self.begin_update(vm, index);
            }
            InputAction::Insert('d') => {
                let index = vm.list.selected;
                return self.request_delete(vm, index);
            }
            InputAction::Insert('r') => return self.refresh(),
            InputAction::Insert('/') | InputAction::FocusPrevious => vm.focus = Focus::Search,
            InputAction::Insert('a') | InputAction::FocusNext => {
                vm.focus = Focus::Form(FormField::Name)
            }
            InputAction::Insert('q') => return Effects::quit(),
            _ => {}
        }
        Effects::none()
    }

    fn process_form_action(
        &mut self,
        action: InputAction,
        field: FormField,
        vm: &mut ViewModel,
    ) -> Effects {
        match action {
            InputAction::Insert(ch) => vm.active_form_mut().field_mut(field).push(ch),
            InputAction::Paste(text) => vm
                .active_form_mut()
                .field_mut(field)
                .extend(text.chars().filter(|c| !c.is_control())),
            InputAction::DeleteBackward => {
                vm.active_form_mut().field_mut(field).pop();
            }
            InputAction::Submit => {
                return match vm.mode {
                    UiMode::Add => self.submit_add(vm),
                    UiMode::Update => self.submit_update(vm),
                };
            }
            InputAction::Cancel => {
                return match vm.mode {
                    UiMode::Update => self.cancel_update(vm),
                    UiMode::Add => {
                        vm.focus = Focus::List;
                        Effects::none()
                    }
                };
            }
            InputAction::FocusNext => {
                vm.focus = field.next().map(Focus::Form).unwrap_or(Focus::Search);
            }
            InputAction::FocusPrevious => {
                vm.focus = field.previous().map(Focus::Form).unwrap_or(Focus::List);
            }
            InputAction::Scroll {
                direction: ScrollDirection::Down,
                ..
            } => {
                if let Some(next) = field.next() {
                    vm.focus = Focus::Form(next);
                }
            }
            InputAction::Scroll {
                direction: ScrollDirection::Up,
                ..
            } => {
                if let Some(previous) = field.previous() {
                    vm.focus = Focus::Form(previous);
                }
            }
            _ => {}
        }
        Effects::none()
    }

    fn process_search_action(&mut self, action: InputAction, vm: &mut ViewModel) -> Effects {
        match action {
            InputAction::Insert(ch) => vm.search_input.push(ch),
            InputAction::Paste(text) => vm
                .search_input
                .extend(text.chars().filter(|c| !c.is_control())),
            InputAction::DeleteBackward => {
                vm.search_input.pop();
            }
            InputAction::Submit => return self.submit_lookup(vm),
            InputAction::Cancel | InputAction::FocusNext => vm.focus = Focus::List,
            InputAction::FocusPrevious => vm.focus = Focus::Form(FormField::Price),
            _ => {}
        }
        Effects::none()
    }

    /// Reset the panel and forget any lookup still in flight so its answer cannot overwrite it.
    fn reset_lookup_panel(&mut self, vm: &mut ViewModel) {
        vm.lookup = LookupPanel::Placeholder;
        self.latest_lookup_request = None;
    }

    fn fetch_list(&mut self) -> ApiCommand {
        let request_id = self.allocate_request_id();
        self.latest_list_request = Some(request_id);
        ApiCommand::FetchList { request_id }
    }

    fn allocate_request_id(&mut self) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        request_id
    }
}

fn lookup_panel_for(id: ProductId, result: Result<Vec<Product>, ApiError>) -> LookupPanel {
    match result {
        Ok(products) => match products.into_iter().next() {
            Some(product) => LookupPanel::Found(product),
            None => LookupPanel::NotFound(id),
        },
        Err(ApiError::Status {
            code, status_text, ..
        }) => LookupPanel::Failed {
            id,
            code,
            status_text,
        },
        Err(_) => LookupPanel::CommunicationError,
    }
}

fn write_failure_message(kind: WriteKind, err: &ApiError) -> String {
    match (kind, err.server_message()) {
        (WriteKind::Create, Some(message)) => messages::create_failed(message),
        (WriteKind::Update, Some(message)) => messages::update_failed(message),
        (WriteKind::Delete, Some(message)) => messages::delete_failed(message),
        (WriteKind::Create, None) => messages::CREATE_COMMUNICATION_ERROR.to_string(),
        (WriteKind::Update, None) => messages::UPDATE_COMMUNICATION_ERROR.to_string(),
        (WriteKind::Delete, None) => messages::DELETE_COMMUNICATION_ERROR.to_string(),
    }
}
