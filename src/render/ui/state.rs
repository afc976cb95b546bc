//! View-model for the catalog screen.
//!
//! Everything the renderer draws lives here: the list, both forms, the lookup panel, any modal,
//! and which region has focus. The controller mutates it; the renderer only reads it.

use crate::catalog::{Product, ProductId};
use crate::render::ui::messages;

/// Which form occupies the form area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Add,
    Update,
}

impl UiMode {
    pub fn title(&self) -> &'static str {
        match self {
            UiMode::Add => "Adicionar produto",
            UiMode::Update => "Atualizar produto",
        }
    }
}

/// Editable fields of a product form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    Price,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Description, FormField::Price];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Nome",
            FormField::Description => "Descrição",
            FormField::Price => "Preço",
        }
    }

    pub fn next(self) -> Option<FormField> {
        match self {
            FormField::Name => Some(FormField::Description),
            FormField::Description => Some(FormField::Price),
            FormField::Price => None,
        }
    }

    pub fn previous(self) -> Option<FormField> {
        match self {
            FormField::Name => None,
            FormField::Description => Some(FormField::Name),
            FormField::Price => Some(FormField::Description),
        }
    }
}

/// Raw text of a product form. `id` is the hidden field of the update form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: String,
}

impl ProductForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load a product's current values, as the update action does.
    pub fn fill_from(&mut self, product: &Product) {
        self.id = Some(product.id.clone());
        self.name = product.name.clone();
        self.description = product.description.clone().unwrap_or_default();
        self.price = product.price.to_string();
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Description => &self.description,
            FormField::Price => &self.price,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Description => &mut self.description,
            FormField::Price => &mut self.price,
        }
    }
}

/// Screen region receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    /// A field of whichever form is currently shown
    Form(FormField),
    Search,
}

/// Rendered product list, or the placeholder shown instead of it.
#[derive(Debug, Clone, Default)]
pub struct ProductListView {
    pub products: Vec<Product>,
    pub selected: usize,
    pub placeholder: Option<String>,
}

impl ProductListView {
    /// Replace the whole list; an empty result shows the "no products" placeholder.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.placeholder = if products.is_empty() {
            Some(messages::LIST_EMPTY.to_string())
        } else {
            None
        };
        self.products = products;
        self.selected = self.selected.min(self.products.len().saturating_sub(1));
    }

    /// Clear the list and show `message` instead.
    pub fn show_error(&mut self, message: &str) {
        self.products.clear();
        self.selected = 0;
        self.placeholder = Some(message.to_string());
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.products.get(self.selected)
    }

    pub fn move_selection(&mut self, delta: i64) {
        if self.products.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.products.len() as i64 - 1;
        self.selected = (self.selected as i64 + delta).clamp(0, last) as usize;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.products.len().saturating_sub(1);
    }

    /// Row text: name, description (with fallback), formatted price.
    pub fn row_columns(product: &Product) -> (String, String, String) {
        (
            product.name.clone(),
            product.description_or(messages::NO_DESCRIPTION).to_string(),
            product.formatted_price(),
        )
    }
}

/// Content of the lookup-by-identifier panel.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupPanel {
    Placeholder,
    /// Emptied by the update action
    Blank,
    Searching,
    Found(Product),
    NotFound(ProductId),
    Failed {
        id: ProductId,
        code: u16,
        status_text: String,
    },
    CommunicationError,
}

/// Tone of a panel line, mapped to colors by the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Muted,
    Normal,
    Warning,
    Error,
}

impl LookupPanel {
    pub fn title(&self) -> String {
        match self {
            LookupPanel::Found(product) => format!("Detalhes do Produto ID: {}", product.id),
            _ => "Busca por ID".to_string(),
        }
    }

    /// Lines displayed inside the panel.
    pub fn lines(&self) -> Vec<(Tone, String)> {
        match self {
            LookupPanel::Placeholder => {
                vec![(Tone::Muted, messages::LOOKUP_PLACEHOLDER.to_string())]
            }
            LookupPanel::Blank => Vec::new(),
            LookupPanel::Searching => vec![(Tone::Muted, messages::LOOKUP_SEARCHING.to_string())],
            LookupPanel::Found(product) => vec![
                (Tone::Normal, format!("Nome: {}", product.name)),
                (
                    Tone::Normal,
                    format!(
                        "Descrição: {}",
                        product.description_or(messages::DESCRIPTION_NOT_PROVIDED)
                    ),
                ),
                (Tone::Normal, format!("Preço: {}", product.formatted_price())),
            ],
            LookupPanel::NotFound(id) => vec![(Tone::Warning, messages::lookup_not_found(id))],
            LookupPanel::Failed {
                id,
                code,
                status_text,
            } => vec![(Tone::Error, messages::lookup_failed(id, *code, status_text))],
            LookupPanel::CommunicationError => vec![(
                Tone::Error,
                messages::LOOKUP_COMMUNICATION_ERROR.to_string(),
            )],
        }
    }
}

/// Popups that capture all input until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Alert(String),
    ConfirmDelete { id: ProductId, name: String },
}

impl Modal {
    pub fn message(&self) -> String {
        match self {
            Modal::Alert(message) => message.clone(),
            Modal::ConfirmDelete { name, .. } => messages::confirm_delete(name),
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Modal::Alert(_) => "Enter OK",
            Modal::ConfirmDelete { .. } => "y/Enter Confirmar | n/Esc Cancelar",
        }
    }
}

/// Status line information
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn format_status_line(&self, service: &str, focus: Focus, mode: UiMode) -> String {
        let hints = match (focus, mode) {
            (Focus::List, _) => "u Atualizar | d Deletar | r Recarregar | / Buscar | q Sair",
            (Focus::Form(_), UiMode::Add) => "Enter Salvar | Tab Próximo | Esc Lista",
            (Focus::Form(_), UiMode::Update) => "Enter Salvar | Tab Próximo | Esc Cancelar",
            (Focus::Search, _) => "Enter Buscar | Esc Lista",
        };
        match &self.message {
            Some(message) => format!("{service} | {message} | {hints}"),
            None => format!("{service} | {hints}"),
        }
    }
}

/// Everything needed to draw one frame.
#[derive(Debug)]
pub struct ViewModel {
    pub mode: UiMode,
    pub add_form: ProductForm,
    pub update_form: ProductForm,
    pub search_input: String,
    pub list: ProductListView,
    pub lookup: LookupPanel,
    pub modal: Option<Modal>,
    pub focus: Focus,
    pub status_line: StatusLine,
    /// Service address, shown in the status line
    pub service_label: String,

    pub viewport_width: u16,
    pub viewport_height: u16,
}

impl ViewModel {
    pub fn new(service_label: impl Into<String>, viewport_width: u16, viewport_height: u16) -> Self {
        Self {
            mode: UiMode::Add,
            add_form: ProductForm::default(),
            update_form: ProductForm::default(),
            search_input: String::new(),
            list: ProductListView::default(),
            lookup: LookupPanel::Placeholder,
            modal: None,
            focus: Focus::List,
            status_line: StatusLine::new(),
            service_label: service_label.into(),
            viewport_width,
            viewport_height,
        }
    }

    /// The form currently shown.
    pub fn active_form(&self) -> &ProductForm {
        match self.mode {
            UiMode::Add => &self.add_form,
            UiMode::Update => &self.update_form,
        }
    }

    pub fn active_form_mut(&mut self) -> &mut ProductForm {
        match self.mode {
            UiMode::Add => &mut self.add_form,
            UiMode::Update => &mut self.update_form,
        }
    }

    /// Hide and reset the update form, show the add form.
    pub fn return_to_add_mode(&mut self) {
        self.update_form.reset();
        self.mode = UiMode::Add;
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.modal = Some(Modal::Alert(message.into()));
    }

    /// Rows of the list that fit on one page (screen minus status line and borders).
    pub fn list_page_rows(&self) -> u16 {
        self.viewport_height.saturating_sub(3).max(1)
    }

    /// Returns true if dimensions actually changed
    pub fn update_terminal_size(&mut self, width: u16, height: u16) -> bool {
        let changed = self.viewport_width != width || self.viewport_height != height;
        if changed {
            self.viewport_width = width;
            self.viewport_height = height;
        }
        changed
    }

    pub fn format_status_line(&self) -> String {
        self.status_line
            .format_status_line(&self.service_label, self.focus, self.mode)
    }
}
