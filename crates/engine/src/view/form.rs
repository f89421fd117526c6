//! Record creation form inputs.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    Value,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Value,
            FormField::Value => FormField::Name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub name: String,
    pub value: String,
}

impl RecordForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Value => &self.value,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Value => &mut self.value,
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.value.clear();
    }
}
