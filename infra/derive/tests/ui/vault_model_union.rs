use smem_derive::vault_model;

#[vault_model]
pub union Bits {
    int: u32,
    float: f32,
}

fn main() {}
