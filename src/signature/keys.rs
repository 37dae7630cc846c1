//! Fixed 1024-bit demonstration key pair. Never generated at runtime.

pub const DEMO_MODULUS: &str = "da3834ceb558da1ebf9cf3fa1aac132e35ea0a1bcbcdf435e4e7e9a89a994d8e\
173fc84faab78a66fdc0f2c15d13c6d1c7f07868232f330be10016c05d435370\
a3cd339ec93e7630c987a42d22228dc10978fb36f2867ac5cce89e84b0902010\
3634fd8e4f05969ab2dbbfc1f8d5450ffdb8aa14b82870fb49a45a9fd0635a91";

pub const DEMO_PUBLIC_EXPONENT: &str = "10001";

pub const DEMO_PRIVATE_EXPONENT: &str = "0ab99a76d258e4978049618058513ebc15b04400ebba5a974f81ca6d1bf40ee8\
bde1c7a18abd6c92f543c76a937d865707219d7958c95813ec6209bc3899377f\
897d451853ee1b69a1dd03d1befdcf64d7be9a3ef0b1d8223f6606784eeba5c4\
3bc1d836d74655a478239e50fd20b6323ae429cdf0468cbfa2f5a0b3d5982fb1";
