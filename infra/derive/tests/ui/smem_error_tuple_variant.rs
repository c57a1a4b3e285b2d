use smem_derive::smem_error;

#[smem_error]
pub enum StoreError {
    Io(std::io::Error),
}

fn main() {}
