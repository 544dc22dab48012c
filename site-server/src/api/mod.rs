//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`meals`] - 菜品管理接口
//! - [`restaurants`] - 餐厅管理接口
//! - [`restaurant_meals`] - 餐厅菜品分配接口
//! - [`reservations`] - 预订管理接口
//! - [`cart`] - 购物车接口
//! - [`payment`] - 模拟支付接口
//! - [`checkout`] - 结账和订单确认接口
//! - [`contact`] - 联系表单接口

pub mod health;

// Data models API
pub mod meals;
pub mod restaurant_meals;
pub mod restaurants;
pub mod reservations;

// Storefront flow API
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod payment;
