use smem_derive::vault_model;

#[vault_model(strict)]
pub struct Token {
    value: String,
}

fn main() {}
