pub struct CompanyUpsert {
    pub company_name: String,
    pub company_address: String,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub tax_id: Option<String>,
}
