use smem_derive::smem_error;

#[smem_error]
pub enum StoreError {
    Io { source: std::io::Error },
}

fn main() {}
