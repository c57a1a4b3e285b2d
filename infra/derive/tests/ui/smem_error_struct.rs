use smem_derive::smem_error;

#[smem_error]
pub struct StoreError {
    message: String,
}

fn main() {}
